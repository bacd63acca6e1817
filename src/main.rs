//! Barrido CLI
//!
//! Sweep sampler entry point for the barrido library.
//!
//! # Usage
//!
//! ```bash
//! # Every configuration of the builtin sweep
//! barrido sample twitter
//!
//! # Twenty configurations from a sweep file
//! barrido sample twitter 20 --config sweep.yaml --seed 1
//!
//! # Space size
//! barrido count --config sweep.yaml
//! ```

use barrido::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
