//! Per-tick trace records and sinks.
//!
//! The scheduler hands one [`TickRecord`] per tick to a [`TraceSink`]. Three sinks are provided:
//! 1. **[`TableReporter`]:** The classic column layout (`Time`, `PID:n`..., `CPU`, `IOs`).
//! 2. **[`TraceLog`]:** Keeps every record in memory.
//! 3. **[`NullTrace`]:** Discards everything.

use std::fmt;
use std::io::{self, Write};

use crate::program::Opcode;
use crate::sched::ProcessState;

/// Width of every column after `Time`.
const COLUMN_WIDTH: usize = 14;

/// Width of an empty `IOs` cell; narrower than [`COLUMN_WIDTH`] in the classic layout.
const IDLE_IO_WIDTH: usize = 10;

/// What one process shows in a trace row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessCell {
    /// The process executed this opcode during the tick.
    Run(Opcode),
    /// The process did not execute; its state after dispatch.
    State(ProcessState),
}

impl fmt::Display for ProcessCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(opcode) => f.pad(&format!("RUN:{opcode}")),
            Self::State(state) => f.pad(state.label()),
        }
    }
}

/// Snapshot of one simulated tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickRecord {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// At least one I/O completed at the start of this tick.
    pub io_completed: bool,
    /// One cell per process, in id order.
    pub cells: Vec<ProcessCell>,
    /// An instruction was dispatched this tick.
    pub cpu_busy: bool,
    /// I/Os still outstanding after this tick.
    pub ios_in_flight: usize,
}

impl TickRecord {
    /// Number of processes shown as executing (0 or 1).
    pub fn running_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, ProcessCell::Run(_) | ProcessCell::State(ProcessState::Running)))
            .count()
    }
}

/// Consumer of the per-tick trace.
pub trait TraceSink {
    /// Called once before the first tick with the number of processes.
    ///
    /// # Errors
    ///
    /// Returns any output failure.
    fn begin(&mut self, processes: usize) -> io::Result<()> {
        let _ = processes;
        Ok(())
    }

    /// Called once per tick, after dispatch and before any I/O is started.
    ///
    /// # Errors
    ///
    /// Returns any output failure.
    fn record(&mut self, tick: &TickRecord) -> io::Result<()>;
}

/// Writes the trace as a fixed-width table.
#[derive(Debug)]
pub struct TableReporter<W: Write> {
    out: W,
}

impl<W: Write> TableReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TableReporter<W> {
    fn begin(&mut self, processes: usize) -> io::Result<()> {
        write!(self.out, "Time")?;
        for pid in 0..processes {
            write!(self.out, "{:>COLUMN_WIDTH$}", format!("PID:{pid:2}"))?;
        }
        writeln!(self.out, "{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}", "CPU", "IOs")
    }

    fn record(&mut self, tick: &TickRecord) -> io::Result<()> {
        let marker = if tick.io_completed { '*' } else { ' ' };
        write!(self.out, "{:3}{marker}", tick.tick)?;
        for cell in &tick.cells {
            write!(self.out, "{cell:>COLUMN_WIDTH$}")?;
        }
        let cpu = if tick.cpu_busy { "1" } else { " " };
        write!(self.out, "{cpu:>COLUMN_WIDTH$}")?;
        if tick.ios_in_flight > 0 {
            write!(self.out, "{:>COLUMN_WIDTH$}", tick.ios_in_flight)?;
        } else {
            write!(self.out, "{:>IDLE_IO_WIDTH$}", " ")?;
        }
        writeln!(self.out)
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLog {
    processes: usize,
    records: Vec<TickRecord>,
}

impl TraceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process count announced by the scheduler.
    pub const fn processes(&self) -> usize {
        self.processes
    }

    /// All records so far, in tick order.
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    /// Ticks with a dispatch.
    pub fn cpu_ticks(&self) -> u64 {
        self.records.iter().filter(|r| r.cpu_busy).count() as u64
    }

    /// Ticks with at least one I/O in flight.
    pub fn io_ticks(&self) -> u64 {
        self.records.iter().filter(|r| r.ios_in_flight > 0).count() as u64
    }
}

impl TraceSink for TraceLog {
    fn begin(&mut self, processes: usize) -> io::Result<()> {
        self.processes = processes;
        Ok(())
    }

    fn record(&mut self, tick: &TickRecord) -> io::Result<()> {
        self.records.push(tick.clone());
        Ok(())
    }
}

/// Discards the trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _tick: &TickRecord) -> io::Result<()> {
        Ok(())
    }
}
