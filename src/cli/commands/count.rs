//! Count command implementation

use std::io::Write;

use crate::cli::CountArgs;
use crate::config::load_or_builtin;
use crate::count::SpaceCounter;
use crate::error::Result;

use super::write_line;

pub fn run_count<W: Write>(args: CountArgs, out: &mut W) -> Result<()> {
    let sweep = load_or_builtin(args.config.as_deref())?;
    let space = sweep.space()?;
    let total = SpaceCounter::new(&space).total()?;
    write_line(out, &total.to_string())
}
