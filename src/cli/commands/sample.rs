//! Sample command implementation

use std::io::Write;

use tracing::info;

use crate::cli::{OutputFormat, SampleArgs};
use crate::config::load_or_builtin;
use crate::error::Result;

use super::write_line;

pub fn run_sample<W: Write>(args: SampleArgs, out: &mut W) -> Result<()> {
    let sweep = load_or_builtin(args.config.as_deref())?;

    let mut sampler = sweep.sampler()?;
    if let Some(seed) = args.seed {
        sampler = sampler.with_seed(seed);
    }

    let mut template = sweep.command.clone();
    if let Some(prefix) = args.prefix {
        template.prefix = prefix;
    }

    let configs = sampler.sample(args.count)?;
    for config in &configs {
        let line = match args.format {
            OutputFormat::Text => template.render(&args.name, config),
            OutputFormat::Json => serde_json::to_string(config)?,
        };
        write_line(out, &line)?;
    }

    info!("emitted {} configurations for '{}'", configs.len(), args.name);
    Ok(())
}
