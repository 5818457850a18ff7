//! Simulation statistics collection and reporting.
//!
//! This module tracks the utilization counters of a run. It provides:
//! 1. **Counters:** Total ticks, ticks with a CPU dispatch, and ticks with an I/O in flight.
//! 2. **Derived metrics:** CPU and I/O utilization as percentages of total ticks.
//! 3. **Reporting:** The `Stats:` block printed after a solved trace.

use std::io::{self, Write};

/// Utilization counters of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Ticks simulated.
    pub total_ticks: u64,
    /// Ticks in which an instruction was dispatched.
    pub cpu_busy: u64,
    /// Ticks in which at least one I/O was in flight.
    pub io_busy: u64,
}

impl SimStats {
    /// CPU utilization in percent; 0 when no ticks were simulated.
    pub fn cpu_utilization(&self) -> f64 {
        Self::percent(self.cpu_busy, self.total_ticks)
    }

    /// I/O utilization in percent; 0 when no ticks were simulated.
    pub fn io_utilization(&self) -> f64 {
        Self::percent(self.io_busy, self.total_ticks)
    }

    fn percent(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            100.0 * part as f64 / total as f64
        }
    }

    /// Writes the statistics block to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures of `out`.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Stats: Total Time {}", self.total_ticks)?;
        writeln!(
            out,
            "Stats: CPU Busy {} ({:.2}%)",
            self.cpu_busy,
            self.cpu_utilization()
        )?;
        writeln!(
            out,
            "Stats: IO Busy  {} ({:.2}%)",
            self.io_busy,
            self.io_utilization()
        )?;
        writeln!(out)
    }

    /// Prints the statistics block to stdout.
    ///
    /// # Errors
    ///
    /// Propagates stdout write failures.
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }
}
