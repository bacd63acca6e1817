//! Declarative parameter entries

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

use super::value::ParamValue;

fn enabled_by_default() -> bool {
    true
}

/// Declarative definition of one parameter
///
/// Field names follow the sweep file format: `values`, `default`, `on`,
/// `depends_on`, `repeat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Parameter name, also the rendered flag name
    pub name: String,
    /// Admissible values
    #[serde(rename = "values", default)]
    pub candidates: Vec<ParamValue>,
    /// Value used when the parameter is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    /// Whether the parameter is sampled at all
    #[serde(rename = "on", default = "enabled_by_default")]
    pub enabled: bool,
    /// Length source expression, `name` or `name+k`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    /// Share one sampled value across the whole tuple
    #[serde(default)]
    pub repeat: bool,
}

impl ParameterEntry {
    /// Create an enabled, independent parameter
    pub fn new<I, V>(name: &str, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self {
            name: name.to_string(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            default: None,
            enabled: true,
            depends_on: None,
            repeat: false,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Disable sampling; the default must be set separately
    pub fn off(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Disable sampling and pin the parameter to `default`
    pub fn disabled(self, default: impl Into<ParamValue>) -> Self {
        self.with_default(default).off()
    }

    /// Size this parameter's tuple by another parameter (`name` or `name+k`)
    pub fn depends_on(mut self, expr: &str) -> Self {
        self.depends_on = Some(expr.to_string());
        self
    }

    /// Duplicate a single sampled value across the tuple
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Parsed `depends_on` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependsOn {
    /// Name of the length source
    pub source: String,
    /// Added to the source's value
    pub offset: usize,
}

impl DependsOn {
    /// Parse `name` or `name+k` for parameter `param`
    pub fn parse(param: &str, expr: &str) -> Result<Self> {
        let invalid = || SweepError::InvalidDependency {
            param: param.to_string(),
            expr: expr.to_string(),
        };

        let (source, offset) = match expr.split_once('+') {
            Some((name, extra)) => {
                let offset = extra.trim().parse::<usize>().map_err(|_| invalid())?;
                (name.trim(), offset)
            }
            None => (expr.trim(), 0),
        };

        if source.is_empty() || source.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self { source: source.to_string(), offset })
    }
}
