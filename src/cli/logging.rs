//! Diagnostics setup for CLI runs
//!
//! Progress and diagnostic lines go through `tracing` to stderr so stdout
//! carries nothing but rendered commands.

use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Totals and accepted samples
    Normal,
    /// Also rejections and snapshot details
    Verbose,
}

impl LogLevel {
    /// Pick a level from the global flags; quiet wins
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Install the stderr subscriber; later calls are no-ops
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogLevel::Quiet.directive(), "error");
        assert_eq!(LogLevel::Normal.directive(), "info");
        assert_eq!(LogLevel::Verbose.directive(), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(LogLevel::Quiet);
        init_tracing(LogLevel::Verbose);
    }
}
