//! Resolved configurations and the uniqueness pool

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::space::ResolvedValue;

/// Ordered mapping from parameter name to resolved value
///
/// Order is registry declaration order followed by overlay insertions.
/// Boolean `false` flags are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Configuration {
    entries: Vec<(String, ResolvedValue)>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite in place, or append when `name` is new
    ///
    /// A `false` boolean removes the key instead.
    pub fn set(&mut self, name: &str, value: ResolvedValue) {
        if value.is_false_flag() {
            self.remove(name);
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, name: &str) -> Option<ResolvedValue> {
        let i = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(i).1)
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Check if a key is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Get number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Configurations already emitted by one sampling call
#[derive(Debug, Default)]
pub struct Pool {
    seen: HashSet<Configuration>,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `config`; returns false if it was already present
    pub fn insert(&mut self, config: &Configuration) -> bool {
        if self.seen.contains(config) {
            return false;
        }
        self.seen.insert(config.clone())
    }

    /// Check membership
    pub fn contains(&self, config: &Configuration) -> bool {
        self.seen.contains(config)
    }

    /// Get number of recorded configurations
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
