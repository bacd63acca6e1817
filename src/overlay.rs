//! Semi-random overlay
//!
//! Some parameters are not sampled independently but read from a fixed table
//! keyed by the value a controller parameter resolved to, e.g. kernel counts
//! per convolution depth. The overlay supplies those tuples for names that are
//! absent from the registry or present but disabled.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};
use crate::space::ParamValue;

/// One row of an overlay table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRow {
    /// Controller value selecting this row
    pub when: ParamValue,
    /// Tuple supplied for the parameter
    pub value: Vec<ParamValue>,
}

/// Overlay table for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayTable {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<OverlayRow>,
}

/// Parameter name -> controller value -> fixed tuple
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemiRandomOverlay {
    controller: Option<String>,
    tables: Vec<OverlayTable>,
}

impl SemiRandomOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an overlay from parsed tables
    pub fn from_tables(controller: Option<String>, tables: Vec<OverlayTable>) -> Self {
        Self { controller, tables }
    }

    /// Set the controller parameter (defaults to the first registry entry)
    pub fn with_controller(mut self, controller: &str) -> Self {
        self.controller = Some(controller.to_string());
        self
    }

    /// Add or replace the tuple for `name` when the controller equals `when`
    pub fn insert<I, V>(&mut self, name: &str, when: impl Into<ParamValue>, value: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let row = OverlayRow { when: when.into(), value: value.into_iter().map(Into::into).collect() };
        let table = match self.tables.iter().position(|t| t.name == name) {
            Some(i) => &mut self.tables[i],
            None => {
                self.tables.push(OverlayTable { name: name.to_string(), rows: Vec::new() });
                let last = self.tables.len() - 1;
                &mut self.tables[last]
            }
        };
        match table.rows.iter_mut().find(|r| r.when == row.when) {
            Some(existing) => existing.value = row.value,
            None => table.rows.push(row),
        }
    }

    /// Builder-style [`SemiRandomOverlay::insert`]
    pub fn with<I, V>(mut self, name: &str, when: impl Into<ParamValue>, value: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.insert(name, when, value);
        self
    }

    /// Configured controller, if any
    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    /// Overlaid parameter names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Tables in declaration order
    pub fn tables(&self) -> &[OverlayTable] {
        &self.tables
    }

    /// Check if the overlay has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Fixed tuple for `name` when the controller resolved to `value`
    pub fn lookup(&self, name: &str, value: &ParamValue) -> Result<&[ParamValue]> {
        let table = self
            .tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SweepError::UnknownParameter { param: name.to_string() })?;
        table
            .rows
            .iter()
            .find(|r| &r.when == value)
            .map(|r| r.value.as_slice())
            .ok_or_else(|| SweepError::OverlayLookup {
                param: name.to_string(),
                controller: self.controller.clone().unwrap_or_else(|| "controller".to_string()),
                value: value.to_string(),
            })
    }
}
