//! Error types with actionable diagnostics.
//!
//! Every failure of a sweep is fatal to the call that raised it. Variants are
//! grouped into an [`ErrorKind`] so callers can tell configuration mistakes
//! from capacity limits and lookup gaps without matching every variant.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

/// Broad classification of a [`SweepError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sweep definition itself is invalid.
    Configuration,
    /// The requested sample count cannot be satisfied.
    Capacity,
    /// A semi-random overlay or controller lookup failed.
    Lookup,
    /// A dependency references an undeclared parameter or forms a cycle.
    DependencyOrder,
}

/// Errors raised while building, counting, or sampling a sweep.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Disabled parameter without a default.
    #[error("Parameter '{param}' is disabled but has no default\n  → Add a `default` or set `on: true`")]
    MissingDefault { param: String },

    /// Parameter with nothing to sample from.
    #[error("Parameter '{param}' has no candidate values\n  → Provide at least one entry in `values`")]
    EmptyCandidates { param: String },

    /// Two entries share a name.
    #[error("Parameter '{param}' is declared more than once")]
    DuplicateParameter { param: String },

    /// `depends_on` expression could not be parsed.
    #[error("Invalid dependency expression '{expr}' on '{param}'\n  → Use `name` or `name+k` with a non-negative integer k")]
    InvalidDependency { param: String, expr: String },

    /// Length source resolved to something that is not a usable tuple length.
    #[error("Parameter '{param}' cannot take its length from '{source_param}' = {value}\n  → Length sources must hold non-negative integers")]
    InvalidLength { param: String, source_param: String, value: String },

    /// Length source is itself a tuple-valued parameter.
    #[error("Parameter '{param}' depends on '{source_param}', which is itself tuple-valued")]
    NonScalarSource { param: String, source_param: String },

    /// Dependency on a parameter that does not exist.
    #[error("Parameter '{param}' depends on undeclared parameter '{reference}'")]
    UnknownDependency { param: String, reference: String },

    /// Dependency on a parameter declared later.
    #[error("Parameter '{param}' depends on '{reference}', which is declared after it\n  → Move '{reference}' above '{param}' in the registry")]
    ForwardDependency { param: String, reference: String },

    /// Dependencies form a cycle.
    #[error("Dependency cycle between parameters: {}", .params.join(" -> "))]
    DependencyCycle { params: Vec<String> },

    /// More samples requested than the space holds.
    #[error("Requested {requested} configurations but the space only holds {available}\n  → Lower the count or enable more parameters")]
    Capacity { requested: u128, available: u128 },

    /// Rejection sampling gave up before reaching the requested count.
    #[error("Gave up after {rejected} consecutive duplicate draws with {accepted} of {requested} configurations accepted")]
    Exhausted { accepted: usize, requested: usize, rejected: u128 },

    /// Space size does not fit the counter.
    #[error("Configuration space is too large to count")]
    SpaceOverflow,

    /// Overlay table has no row for the controller value.
    #[error("Overlay for '{param}' has no entry for {controller} = {value}")]
    OverlayLookup { param: String, controller: String, value: String },

    /// Overlay lookup for a name that is not overlaid.
    #[error("Parameter '{param}' is not part of the overlay")]
    UnknownParameter { param: String },

    /// Controller is missing or not a scalar parameter.
    #[error("Overlay controller '{controller}' is not a declared scalar parameter")]
    UnknownController { controller: String },

    /// Sweep file not found.
    #[error("Sweep file not found: {path}\n  → Create a sweep file or drop --config to use the builtin sweep")]
    ConfigNotFound { path: PathBuf },

    /// Sweep file could not be parsed.
    #[error("Invalid sweep file {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for SweepError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}

impl SweepError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDefault { .. }
            | Self::EmptyCandidates { .. }
            | Self::DuplicateParameter { .. }
            | Self::InvalidDependency { .. }
            | Self::InvalidLength { .. }
            | Self::NonScalarSource { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParsing { .. }
            | Self::Serialization { .. }
            | Self::Io { .. } => ErrorKind::Configuration,
            Self::Capacity { .. } | Self::Exhausted { .. } | Self::SpaceOverflow => {
                ErrorKind::Capacity
            }
            Self::OverlayLookup { .. }
            | Self::UnknownParameter { .. }
            | Self::UnknownController { .. } => ErrorKind::Lookup,
            Self::UnknownDependency { .. }
            | Self::ForwardDependency { .. }
            | Self::DependencyCycle { .. } => ErrorKind::DependencyOrder,
        }
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingDefault { .. } => "E001",
            Self::EmptyCandidates { .. } => "E002",
            Self::DuplicateParameter { .. } => "E003",
            Self::InvalidDependency { .. } => "E004",
            Self::InvalidLength { .. } => "E005",
            Self::NonScalarSource { .. } => "E006",
            Self::UnknownDependency { .. } => "E010",
            Self::DependencyCycle { .. } => "E011",
            Self::ForwardDependency { .. } => "E012",
            Self::Capacity { .. } => "E020",
            Self::Exhausted { .. } => "E021",
            Self::SpaceOverflow => "E022",
            Self::OverlayLookup { .. } => "E030",
            Self::UnknownParameter { .. } => "E031",
            Self::UnknownController { .. } => "E032",
            Self::ConfigNotFound { .. } => "E040",
            Self::ConfigParsing { .. } => "E041",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
