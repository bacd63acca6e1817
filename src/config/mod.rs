//! Sweep file loading
//!
//! A sweep file declares the parameter registry, the semi-random overlay and
//! the command template in YAML:
//!
//! ```yaml
//! command:
//!   prefix: "python train.py --epochs=10"
//!   tag_flag: img_prefix
//! controller: conv_layer_n
//! params:
//!   - name: conv_layer_n
//!     values: [2, 3]
//!     default: 2
//!     on: false
//!   - name: dr
//!     values: [0.5]
//!     depends_on: conv_layer_n
//! overlay:
//!   - name: nkerns
//!     rows:
//!       - when: 2
//!         value: [6, 12]
//! ```

mod builtin;

#[cfg(test)]
mod tests;

pub use builtin::builtin_sweep;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SweepError};
use crate::overlay::{OverlayTable, SemiRandomOverlay};
use crate::render::CommandTemplate;
use crate::sample::Sampler;
use crate::space::{Registry, SweepSpace};

/// Parsed sweep file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    /// Command template for rendered runs
    #[serde(default)]
    pub command: CommandTemplate,
    /// Overlay controller; the first parameter when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    /// Parameter registry in declaration order
    #[serde(default)]
    pub params: Registry,
    /// Semi-random overlay tables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlay: Vec<OverlayTable>,
}

impl SweepFile {
    /// Overlay built from this file
    pub fn overlay(&self) -> SemiRandomOverlay {
        SemiRandomOverlay::from_tables(self.controller.clone(), self.overlay.clone())
    }

    /// Validated snapshot of the registry
    pub fn space(&self) -> Result<SweepSpace> {
        self.params.snapshot()
    }

    /// Sampler over this sweep
    pub fn sampler(&self) -> Result<Sampler> {
        Sampler::with_overlay(self.space()?, self.overlay())
    }
}

/// Parse a sweep file from YAML text; `path` is only used in errors
pub fn parse_sweep(yaml: &str, path: &Path) -> Result<SweepFile> {
    serde_yaml::from_str(yaml).map_err(|e| SweepError::ConfigParsing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a sweep file from disk
pub fn load_sweep<P: AsRef<Path>>(path: P) -> Result<SweepFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SweepError::ConfigNotFound { path: path.to_path_buf() });
    }
    let yaml = fs::read_to_string(path)
        .map_err(|e| SweepError::io(format!("reading {}", path.display()), e))?;
    parse_sweep(&yaml, path)
}

/// Load `path`, or the builtin sweep when no path is given
pub fn load_or_builtin(path: Option<&Path>) -> Result<SweepFile> {
    match path {
        Some(path) => load_sweep(path),
        None => Ok(builtin_sweep()),
    }
}
