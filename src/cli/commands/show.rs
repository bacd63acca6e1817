//! Show command implementation

use std::io::Write;

use crate::cli::ShowArgs;
use crate::config::load_or_builtin;
use crate::error::Result;
use crate::space::{EffectiveParam, ParamValue, SweepSpace};

use super::write_line;

pub fn run_show<W: Write>(args: ShowArgs, out: &mut W) -> Result<()> {
    let sweep = load_or_builtin(args.config.as_deref())?;
    let sampler = sweep.sampler()?;
    let space = sampler.space();

    write_line(out, "Parameters:")?;
    for param in space.params() {
        write_line(out, &format!("  {}", describe(space, param)))?;
    }

    let order: Vec<&str> = space.order().iter().map(|&i| space.params()[i].name.as_str()).collect();
    write_line(out, &format!("Resolution order: {}", order.join(" -> ")))?;

    let overlay = sampler.overlay();
    if !overlay.is_empty() {
        write_line(
            out,
            &format!("Overlay (controller: {}):", overlay.controller().unwrap_or("-")),
        )?;
        for table in overlay.tables() {
            for row in &table.rows {
                write_line(out, &format!("  {} @ {}: ({})", table.name, row.when, join(&row.value)))?;
            }
        }
    }

    write_line(out, &format!("Total: {}", sampler.total()?))
}

fn describe(space: &SweepSpace, param: &EffectiveParam) -> String {
    let mut line = format!(
        "{} [{}] {{{}}}",
        param.name,
        if param.enabled { "on" } else { "off" },
        join(&param.candidates)
    );
    if let Some(dep) = &param.dependency {
        let source = &space.params()[dep.source].name;
        if dep.offset > 0 {
            line.push_str(&format!(" x len({source}+{})", dep.offset));
        } else {
            line.push_str(&format!(" x len({source})"));
        }
        if param.repeat {
            line.push_str(" repeat");
        }
    }
    line
}

fn join(values: &[ParamValue]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
