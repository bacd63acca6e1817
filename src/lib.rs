//! Unique hyperparameter sweeps rendered as training commands.
//!
//! This crate draws distinct configurations from a declared parameter space
//! and turns each one into a ready-to-run command line:
//! - [`space`]: the parameter registry and its validated snapshot
//! - [`count`]: exact size of the configuration space
//! - [`sample`]: rejection sampling with a uniqueness pool
//! - [`overlay`]: tuples keyed by a controller parameter's value
//! - [`render`]: command flags and a compact run signature
//! - [`config`]: YAML sweep files and the builtin sweep
//!
//! # Toyota Way Principles
//!
//! - **Jidoka**: An invalid registry is rejected before the first draw
//! - **Poka-yoke**: Requests larger than the space fail instead of spinning
//!
//! # Example
//!
//! ```
//! use barrido::{CommandTemplate, ParameterEntry, Registry, Sampler};
//!
//! let registry = Registry::new()
//!     .with(ParameterEntry::new("depth", [2i64, 3]).disabled(2i64))
//!     .with(ParameterEntry::new("dr", [0.25, 0.5]).depends_on("depth"));
//!
//! let sampler = Sampler::new(registry.snapshot()?).with_seed(7);
//! assert_eq!(sampler.total()?, 4);
//!
//! let template = CommandTemplate::new("python train.py");
//! for config in sampler.sample(None)? {
//!     println!("{}", template.render("demo", &config));
//! }
//! # Ok::<(), barrido::SweepError>(())
//! ```

pub mod cli;
pub mod config;
pub mod count;
pub mod error;
pub mod overlay;
pub mod render;
pub mod sample;
pub mod space;

pub use config::{builtin_sweep, load_or_builtin, load_sweep, parse_sweep, SweepFile};
pub use count::{LengthResolution, SpaceCounter};
pub use error::{ErrorKind, Result, SweepError};
pub use overlay::{OverlayRow, OverlayTable, SemiRandomOverlay};
pub use render::{params_to_string, CommandTemplate, RenderStyle};
pub use sample::{Configuration, Pool, Sampler};
pub use space::{ParamValue, ParameterEntry, Registry, ResolvedValue, SweepSpace};
