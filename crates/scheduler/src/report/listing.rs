//! Instruction listing printed when the trace is left for the reader to work out.

use std::io::{self, Write};

use crate::config::SchedulerConfig;
use crate::sched::ProcessTable;

/// Writes each process's instruction list followed by the policy description.
///
/// # Errors
///
/// Propagates write failures of `out`.
pub fn write_listing(
    table: &ProcessTable,
    config: &SchedulerConfig,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(
        out,
        "Produce a trace of what would happen when you run these processes:"
    )?;
    for proc in table.iter() {
        writeln!(out, "Process {}", proc.pid())?;
        for opcode in proc.instructions() {
            writeln!(out, "  {opcode}")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", config.describe())
}
