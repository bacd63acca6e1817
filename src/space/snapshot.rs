//! Effective, validated view of a registry

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::{Result, SweepError};

use super::entry::DependsOn;
use super::value::ParamValue;
use super::Registry;

/// Resolved length dependency of a tuple-valued parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Index of the length source in declaration order
    pub source: usize,
    /// Added to the source's value
    pub offset: usize,
}

/// One parameter after collapse and validation
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveParam {
    pub name: String,
    /// Distinct candidates; a single default when disabled
    pub candidates: Vec<ParamValue>,
    pub enabled: bool,
    pub dependency: Option<Dependency>,
    pub repeat: bool,
}

/// Immutable snapshot of a registry, computed once per run
///
/// Every invariant the sampler relies on is checked here, so counting and
/// sampling never see a disabled entry without a default, an empty candidate
/// list, or a dangling dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpace {
    params: Vec<EffectiveParam>,
    index: HashMap<String, usize>,
    order: Vec<usize>,
}

impl SweepSpace {
    /// Collapse and validate `registry`
    pub fn build(registry: &Registry) -> Result<Self> {
        let mut index = HashMap::with_capacity(registry.len());
        for (i, entry) in registry.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(SweepError::DuplicateParameter { param: entry.name.clone() });
            }
        }

        let mut params = Vec::with_capacity(registry.len());
        for (position, entry) in registry.iter().enumerate() {
            let candidates = if entry.enabled {
                dedup(&entry.candidates)
            } else {
                let default = entry
                    .default
                    .clone()
                    .ok_or_else(|| SweepError::MissingDefault { param: entry.name.clone() })?;
                vec![default]
            };
            if candidates.is_empty() {
                return Err(SweepError::EmptyCandidates { param: entry.name.clone() });
            }

            let dependency = match &entry.depends_on {
                Some(expr) => {
                    let dep = DependsOn::parse(&entry.name, expr)?;
                    let source = *index.get(&dep.source).ok_or_else(|| {
                        SweepError::UnknownDependency {
                            param: entry.name.clone(),
                            reference: dep.source.clone(),
                        }
                    })?;
                    if source > position {
                        return Err(SweepError::ForwardDependency {
                            param: entry.name.clone(),
                            reference: dep.source,
                        });
                    }
                    Some(Dependency { source, offset: dep.offset })
                }
                None => {
                    if entry.repeat {
                        warn!(param = %entry.name, "repeat has no effect without depends_on");
                    }
                    None
                }
            };

            params.push(EffectiveParam {
                name: entry.name.clone(),
                candidates,
                enabled: entry.enabled,
                dependency,
                repeat: entry.repeat,
            });
        }

        let order = resolution_order(&params)?;
        check_length_sources(&params)?;

        debug!(
            params = params.len(),
            order = ?order.iter().map(|&i| params[i].name.as_str()).collect::<Vec<_>>(),
            "built sweep space"
        );

        Ok(Self { params, index, order })
    }

    /// Parameters in declaration order
    pub fn params(&self) -> &[EffectiveParam] {
        &self.params
    }

    /// Get a parameter by name
    pub fn get(&self, name: &str) -> Option<&EffectiveParam> {
        self.index_of(name).map(|i| &self.params[i])
    }

    /// Declaration index of a parameter
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Indices in resolution order: every length source precedes its dependents
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Check if the space has no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Indices of parameters that size some tuple, ascending
    pub fn length_sources(&self) -> Vec<usize> {
        self.params
            .iter()
            .filter_map(|p| p.dependency.as_ref().map(|d| d.source))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tuple length of `param` when its source resolved to `value`
    pub fn tuple_len(&self, param: &EffectiveParam, value: &ParamValue) -> Result<usize> {
        let Some(dep) = &param.dependency else {
            return Ok(1);
        };
        length_from(&param.name, &self.params[dep.source].name, dep.offset, value)
    }
}

fn dedup(values: &[ParamValue]) -> Vec<ParamValue> {
    let mut out: Vec<ParamValue> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

fn length_from(param: &str, source: &str, offset: usize, value: &ParamValue) -> Result<usize> {
    value
        .as_int()
        .and_then(|v| usize::try_from(v).ok())
        .and_then(|v| v.checked_add(offset))
        .ok_or_else(|| SweepError::InvalidLength {
            param: param.to_string(),
            source_param: source.to_string(),
            value: value.to_string(),
        })
}

/// Kahn's algorithm with declaration order as tie-break.
///
/// Sources are declared before their dependents, so only a self-reference
/// can leave nodes unresolved.
fn resolution_order(params: &[EffectiveParam]) -> Result<Vec<usize>> {
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); params.len()];
    let mut pending = vec![0usize; params.len()];
    for (i, p) in params.iter().enumerate() {
        if let Some(dep) = &p.dependency {
            dependents[dep.source].push(i);
            pending[i] += 1;
        }
    }

    let mut ready: BTreeSet<usize> = (0..params.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(params.len());
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &d in &dependents[i] {
            pending[d] -= 1;
            if pending[d] == 0 {
                ready.insert(d);
            }
        }
    }

    if order.len() < params.len() {
        let start = (0..params.len()).find(|&i| pending[i] > 0).unwrap_or_default();
        return Err(SweepError::DependencyCycle { params: cycle_from(params, start) });
    }
    Ok(order)
}

/// Follow dependency edges from `start` until a node repeats.
fn cycle_from(params: &[EffectiveParam], start: usize) -> Vec<String> {
    let mut seen = Vec::new();
    let mut current = start;
    while !seen.contains(&current) {
        seen.push(current);
        match &params[current].dependency {
            Some(dep) => current = dep.source,
            None => break,
        }
    }
    let first = seen.iter().position(|&i| i == current).unwrap_or_default();
    let mut cycle: Vec<String> = seen[first..].iter().map(|&i| params[i].name.clone()).collect();
    cycle.push(params[current].name.clone());
    cycle
}

fn check_length_sources(params: &[EffectiveParam]) -> Result<()> {
    for p in params {
        let Some(dep) = &p.dependency else { continue };
        let source = &params[dep.source];
        if source.dependency.is_some() {
            return Err(SweepError::NonScalarSource {
                param: p.name.clone(),
                source_param: source.name.clone(),
            });
        }
        for candidate in &source.candidates {
            length_from(&p.name, &source.name, dep.offset, candidate)?;
        }
    }
    Ok(())
}
