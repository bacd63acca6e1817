//! CLI command implementations

mod count;
mod sample;
mod show;


use std::io::{self, Write};

use crate::cli::{init_tracing, Cli, Command, LogLevel};
use crate::error::{Result, SweepError};

/// Execute a CLI command, writing its output to stdout
pub fn run_command(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command_to(cli, &mut out)
}

/// Execute a CLI command against an arbitrary writer
pub fn run_command_to<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Command::Sample(args) => sample::run_sample(args, out),
        Command::Count(args) => count::run_count(args, out),
        Command::Show(args) => show::run_show(args, out),
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(|e| SweepError::io("writing output", e))
}
