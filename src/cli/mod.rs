//! Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Print every configuration of the builtin sweep as a command
//! barrido sample twitter
//!
//! # Ten configurations from a sweep file, reproducibly
//! barrido sample twitter 10 --config sweep.yaml --seed 42
//!
//! # Size of the configuration space
//! barrido count --config sweep.yaml
//!
//! # Effective registry after collapsing disabled parameters
//! barrido show --config sweep.yaml
//! ```

mod commands;
mod logging;

pub use commands::{run_command, run_command_to};
pub use logging::{init_tracing, LogLevel};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Barrido: unique hyperparameter sweeps rendered as training commands
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "barrido")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Sample unique hyperparameter configurations and render them as training commands")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sample unique configurations and print one command per line
    Sample(SampleArgs),

    /// Print the exact size of the configuration space
    Count(CountArgs),

    /// Show the effective registry and overlay
    Show(ShowArgs),
}

/// Arguments for the sample command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Run label embedded in every command's tag
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Number of configurations (default: the whole space)
    #[arg(value_name = "COUNT")]
    pub count: Option<usize>,

    /// Sweep file (default: builtin sweep)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the command prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the count command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CountArgs {
    /// Sweep file (default: builtin sweep)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the show command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    /// Sweep file (default: builtin sweep)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Output format for sampled configurations
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rendered command lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_name_only() {
        let cli = parse_args(["barrido", "sample", "twitter"]).unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.name, "twitter");
                assert_eq!(args.count, None);
                assert_eq!(args.config, None);
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_parse_sample_with_count_and_options() {
        let cli = parse_args([
            "barrido", "sample", "run", "10", "--config", "sweep.yaml", "--seed", "42", "--format",
            "json", "--prefix", "./train",
        ])
        .unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.count, Some(10));
                assert_eq!(args.config, Some(PathBuf::from("sweep.yaml")));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.prefix.as_deref(), Some("./train"));
            }
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_count() {
        assert!(parse_args(["barrido", "sample", "run", "many"]).is_err());
    }

    #[test]
    fn test_parse_count_and_show() {
        let cli = parse_args(["barrido", "count", "-c", "s.yaml"]).unwrap();
        assert_eq!(cli.command, Command::Count(CountArgs { config: Some(PathBuf::from("s.yaml")) }));

        let cli = parse_args(["barrido", "show"]).unwrap();
        assert_eq!(cli.command, Command::Show(ShowArgs { config: None }));
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["barrido", "count", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);

        let cli = parse_args(["barrido", "-v", "count"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_sample_requires_name() {
        assert!(parse_args(["barrido", "sample"]).is_err());
    }
}
