//! Rejection sampler over a sweep space

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::count::SpaceCounter;
use crate::error::{Result, SweepError};
use crate::overlay::SemiRandomOverlay;
use crate::space::{ParamValue, ResolvedValue, SweepSpace};

use super::configuration::{Configuration, Pool};

/// Draws unique configurations from a [`SweepSpace`]
///
/// Each draw resolves every parameter in resolution order with fresh random
/// choices, then fills overlay parameters from the controller's value.
/// Duplicates are rejected and redrawn. The number of consecutive rejections
/// is bounded by `retry_factor` times the inverse probability of the rarest
/// configuration, so a call can never spin forever on a broken generator.
#[derive(Debug, Clone)]
pub struct Sampler {
    space: SweepSpace,
    overlay: SemiRandomOverlay,
    controller: Option<usize>,
    seed: Option<u64>,
    retry_factor: u128,
}

impl Sampler {
    /// Default bound on consecutive rejections, per configuration in the space
    pub const DEFAULT_RETRY_FACTOR: u128 = 32;

    /// Create a sampler without an overlay
    pub fn new(space: SweepSpace) -> Self {
        Self {
            space,
            overlay: SemiRandomOverlay::new(),
            controller: None,
            seed: None,
            retry_factor: Self::DEFAULT_RETRY_FACTOR,
        }
    }

    /// Create a sampler that consults `overlay`
    ///
    /// The controller defaults to the first registry entry and must be a
    /// declared scalar parameter.
    pub fn with_overlay(space: SweepSpace, overlay: SemiRandomOverlay) -> Result<Self> {
        if overlay.is_empty() {
            return Ok(Self::new(space));
        }

        let name = match overlay.controller() {
            Some(name) => name.to_string(),
            None => space
                .params()
                .first()
                .map(|p| p.name.clone())
                .ok_or_else(|| SweepError::UnknownController { controller: String::new() })?,
        };
        let controller = space
            .index_of(&name)
            .filter(|&i| space.params()[i].dependency.is_none())
            .ok_or_else(|| SweepError::UnknownController { controller: name.clone() })?;

        let overlay = match overlay.controller() {
            Some(_) => overlay,
            None => overlay.with_controller(&name),
        };

        Ok(Self { controller: Some(controller), overlay, ..Self::new(space) })
    }

    /// Seed the generator for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the rejection bound multiplier (at least 1)
    pub fn with_retry_factor(mut self, factor: u128) -> Self {
        self.retry_factor = factor.max(1);
        self
    }

    /// The snapshot being sampled
    pub fn space(&self) -> &SweepSpace {
        &self.space
    }

    /// The overlay being applied
    pub fn overlay(&self) -> &SemiRandomOverlay {
        &self.overlay
    }

    /// Exact size of the space
    pub fn total(&self) -> Result<u128> {
        SpaceCounter::new(&self.space).total()
    }

    /// Draw one configuration without any uniqueness check
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Result<Configuration> {
        let params = self.space.params();
        let mut resolved: Vec<Option<ResolvedValue>> = vec![None; params.len()];

        for &i in self.space.order() {
            let param = &params[i];
            let value = match &param.dependency {
                None => ResolvedValue::Scalar(choose(rng, &param.candidates)),
                Some(dep) => {
                    let source = resolved[dep.source]
                        .as_ref()
                        .and_then(ResolvedValue::as_scalar)
                        .ok_or_else(|| SweepError::NonScalarSource {
                            param: param.name.clone(),
                            source_param: params[dep.source].name.clone(),
                        })?;
                    let len = self.space.tuple_len(param, source)?;
                    if param.repeat {
                        let shared = choose(rng, &param.candidates);
                        ResolvedValue::Tuple(vec![shared; len])
                    } else {
                        ResolvedValue::Tuple((0..len).map(|_| choose(rng, &param.candidates)).collect())
                    }
                }
            };
            resolved[i] = Some(value);
        }

        let mut config = Configuration::new();
        for (param, value) in params.iter().zip(&resolved) {
            if let Some(value) = value {
                config.set(&param.name, value.clone());
            }
        }

        if let Some(c) = self.controller {
            let controller_value = resolved[c].as_ref().and_then(ResolvedValue::as_scalar).ok_or_else(
                || SweepError::UnknownController { controller: params[c].name.clone() },
            )?;
            for name in self.overlay.names() {
                let overlaid = self.space.get(name).map_or(true, |p| !p.enabled);
                if overlaid {
                    let tuple = self.overlay.lookup(name, controller_value)?;
                    config.set(name, ResolvedValue::Tuple(tuple.to_vec()));
                }
            }
        }

        Ok(config)
    }

    /// Draw `n` distinct configurations, or the whole space when `n` is `None`
    ///
    /// Uses a seeded generator when [`Sampler::with_seed`] was called and an
    /// OS-seeded one otherwise.
    pub fn sample(&self, n: Option<usize>) -> Result<Vec<Configuration>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.sample_with_rng(n, &mut rng)
    }

    /// [`Sampler::sample`] with a caller-supplied generator
    pub fn sample_with_rng<R: Rng>(
        &self,
        n: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<Configuration>> {
        let counter = SpaceCounter::new(&self.space);
        let n = match n {
            Some(n) => {
                // a space too large to count still holds any usize request
                let total = match counter.total() {
                    Err(SweepError::SpaceOverflow) => u128::MAX,
                    total => total?,
                };
                info!("total: {total}");
                if n as u128 > total {
                    return Err(SweepError::Capacity { requested: n as u128, available: total });
                }
                n
            }
            None => {
                let total = counter.total()?;
                info!("total: {total}");
                usize::try_from(total).map_err(|_| SweepError::SpaceOverflow)?
            }
        };

        // waiting for the rarest configuration longer than this is
        // vanishingly unlikely with a working generator
        let budget = self.retry_factor.saturating_mul(counter.rarest_odds()?).max(self.retry_factor);
        let mut pool = Pool::new();
        let mut samples = Vec::with_capacity(n.min(4096));
        let mut rejected: u128 = 0;

        while samples.len() < n {
            let config = self.draw(rng)?;
            if !pool.insert(&config) {
                rejected += 1;
                if rejected > budget {
                    return Err(SweepError::Exhausted {
                        accepted: samples.len(),
                        requested: n,
                        rejected,
                    });
                }
                continue;
            }
            if rejected > 0 {
                debug!("accepted after {rejected} duplicate draws");
            }
            rejected = 0;
            info!("i = {}: {config}", samples.len() + 1);
            samples.push(config);
        }

        Ok(samples)
    }
}

fn choose<R: Rng>(rng: &mut R, candidates: &[ParamValue]) -> ParamValue {
    candidates[rng.random_range(0..candidates.len())].clone()
}
