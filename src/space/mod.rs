//! Parameter registry and its validated snapshot
//!
//! A [`Registry`] is the declarative, ordered table of parameter entries as
//! written by the user. It is never mutated by counting or sampling. Each run
//! builds a [`SweepSpace`] from it once: disabled entries are collapsed to
//! their default, dependencies are resolved into an explicit graph, and the
//! resolution order is fixed.

mod entry;
mod snapshot;
mod value;

#[cfg(test)]
mod tests;

pub use entry::{DependsOn, ParameterEntry};
pub use snapshot::{Dependency, EffectiveParam, SweepSpace};
pub use value::{ParamValue, ResolvedValue};

use serde::{Deserialize, Serialize};

/// Ordered table of parameter entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: Vec<ParameterEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; declaration order is output order
    pub fn add(&mut self, entry: ParameterEntry) {
        self.entries.push(entry);
    }

    /// Builder-style [`Registry::add`]
    pub fn with(mut self, entry: ParameterEntry) -> Self {
        self.add(entry);
        self
    }

    /// Get an entry by name
    pub fn get(&self, name: &str) -> Option<&ParameterEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ParameterEntry> {
        self.entries.iter()
    }

    /// Build the effective snapshot used by counting and sampling
    pub fn snapshot(&self) -> crate::Result<SweepSpace> {
        SweepSpace::build(self)
    }
}

impl FromIterator<ParameterEntry> for Registry {
    fn from_iter<T: IntoIterator<Item = ParameterEntry>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
