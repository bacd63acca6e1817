//! Exact configuration-space counting
//!
//! A tuple-valued parameter contributes `len(candidates) ** dup_times`
//! configurations (or `len(candidates)` when its value is repeated), where
//! `dup_times` comes from the value its length source resolved to. Since that
//! value varies, the total is a sum over every combination of length-source
//! values rather than a single product. Enumerating the sources keeps the
//! count exact and deterministic for a given [`SweepSpace`].

use std::collections::HashMap;

use crate::error::{Result, SweepError};
use crate::space::{EffectiveParam, ParamValue, SweepSpace};

/// Explicit values for some length sources
///
/// Fixed sources still contribute their candidate count as a factor, but their
/// dependents are sized by the fixed value alone instead of being summed over
/// every candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthResolution {
    fixed: HashMap<String, ParamValue>,
}

impl LengthResolution {
    /// Create an empty resolution (every source is summed over)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix a length source to `value`
    pub fn fix(mut self, source: &str, value: impl Into<ParamValue>) -> Self {
        self.fixed.insert(source.to_string(), value.into());
        self
    }

    /// Get the fixed value of a source
    pub fn get(&self, source: &str) -> Option<&ParamValue> {
        self.fixed.get(source)
    }
}

/// Counts distinct configurations of a [`SweepSpace`]
#[derive(Debug, Clone, Copy)]
pub struct SpaceCounter<'a> {
    space: &'a SweepSpace,
}

impl<'a> SpaceCounter<'a> {
    /// Create a counter over `space`
    pub fn new(space: &'a SweepSpace) -> Self {
        Self { space }
    }

    /// Exact number of distinct configurations
    pub fn total(&self) -> Result<u128> {
        self.count_resolved(&LengthResolution::new())
    }

    /// Number of configurations with some length sources pinned
    pub fn count_resolved(&self, resolution: &LengthResolution) -> Result<u128> {
        let sources = self.space.length_sources();
        let params = self.space.params();

        // (choices to enumerate, constant factor) per source
        let mut choices: Vec<Vec<&ParamValue>> = Vec::with_capacity(sources.len());
        let mut fixed_factor: u128 = 1;
        for &s in &sources {
            let source = &params[s];
            match resolution.get(&source.name) {
                Some(value) => {
                    if !source.candidates.contains(value) {
                        return Err(SweepError::InvalidLength {
                            param: source.name.clone(),
                            source_param: source.name.clone(),
                            value: value.to_string(),
                        });
                    }
                    choices.push(vec![value]);
                    fixed_factor = mul(fixed_factor, source.candidates.len() as u128)?;
                }
                None => choices.push(source.candidates.iter().collect()),
            }
        }

        let mut total: u128 = 0;
        let mut cursor = vec![0usize; sources.len()];
        loop {
            let assignment: HashMap<usize, &ParamValue> = sources
                .iter()
                .zip(&cursor)
                .enumerate()
                .map(|(k, (&s, &c))| (s, choices[k][c]))
                .collect();

            let mut product = fixed_factor;
            for (i, param) in params.iter().enumerate() {
                if assignment.contains_key(&i) {
                    continue;
                }
                product = mul(product, self.factor(param, &assignment)?)?;
            }
            total = total.checked_add(product).ok_or(SweepError::SpaceOverflow)?;

            if !advance(&mut cursor, &choices) {
                break;
            }
        }
        Ok(total)
    }

    /// Inverse probability of the least likely configuration in one draw
    ///
    /// Draws are not uniform when tuple lengths vary: a configuration whose
    /// source picked a long tuple is rarer than one with a short tuple. This
    /// is the product over independent parameters of their candidate count,
    /// where a length source also takes the largest choice count among its
    /// dependents. Saturates at `u128::MAX`.
    pub fn rarest_odds(&self) -> Result<u128> {
        let params = self.space.params();
        let sources = self.space.length_sources();

        let mut odds: u128 = 1;
        for (i, param) in params.iter().enumerate() {
            if param.dependency.is_some() {
                continue;
            }
            let n = param.candidates.len() as u128;
            if !sources.contains(&i) {
                odds = odds.saturating_mul(n);
                continue;
            }

            let mut worst: u128 = 1;
            for value in &param.candidates {
                let mut choices: u128 = 1;
                let dependents = params
                    .iter()
                    .filter(|p| p.dependency.as_ref().is_some_and(|d| d.source == i));
                for dependent in dependents {
                    let len = self.space.tuple_len(dependent, value)?;
                    let factor = tuple_choices(dependent, len).unwrap_or(u128::MAX);
                    choices = choices.saturating_mul(factor);
                }
                worst = worst.max(choices);
            }
            odds = odds.saturating_mul(n).saturating_mul(worst);
        }
        Ok(odds)
    }

    fn factor(&self, param: &EffectiveParam, assignment: &HashMap<usize, &ParamValue>) -> Result<u128> {
        let Some(dep) = &param.dependency else {
            return Ok(param.candidates.len() as u128);
        };
        let value = assignment.get(&dep.source).ok_or_else(|| SweepError::UnknownDependency {
            param: param.name.clone(),
            reference: self.space.params()[dep.source].name.clone(),
        })?;
        let dup_times = self.space.tuple_len(param, value)?;
        tuple_choices(param, dup_times).ok_or(SweepError::SpaceOverflow)
    }
}

/// Distinct tuples of length `len` for a dependent parameter; `None` on overflow
fn tuple_choices(param: &EffectiveParam, len: usize) -> Option<u128> {
    let n = param.candidates.len() as u128;
    if len == 0 {
        return Some(1);
    }
    if param.repeat {
        return Some(n);
    }
    n.checked_pow(u32::try_from(len).ok()?)
}

fn mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or(SweepError::SpaceOverflow)
}

/// Odometer step; returns false once every combination has been visited.
fn advance(cursor: &mut [usize], choices: &[Vec<&ParamValue>]) -> bool {
    for (slot, options) in cursor.iter_mut().zip(choices).rev() {
        *slot += 1;
        if *slot < options.len() {
            return true;
        }
        *slot = 0;
    }
    false
}
