//! Simulator: owns the configuration and the loaded process table.
//!
//! Loading happens once, up front, and is the only consumer of the PRNG. The
//! scheduler is built from the loaded table when the run starts.

use std::io::{self, Write};

use tracing::info;

use crate::common::SimError;
use crate::config::Config;
use crate::program::{ProgramLoader, Workload};
use crate::report::{TraceSink, write_listing};
use crate::sched::{ProcessTable, Scheduler};
use crate::stats::SimStats;

/// Top-level simulator: configuration plus the process table built from a workload.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: Config,
    table: ProcessTable,
}

impl Simulator {
    /// Loads `workload` with a loader seeded from `config.loader`.
    ///
    /// # Errors
    ///
    /// Propagates loader errors.
    pub fn new(config: Config, workload: &Workload) -> Result<Self, SimError> {
        let mut loader = ProgramLoader::from_config(&config.loader);
        let table = loader.load_workload(workload)?;
        info!(
            processes = table.len(),
            seed = loader.seed(),
            "workload loaded"
        );
        Ok(Self { config, table })
    }

    /// The configuration of this run.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The loaded processes, before any instruction has run.
    pub const fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// Writes the per-process instruction listing and the policy description.
    ///
    /// # Errors
    ///
    /// Propagates write failures of `out`.
    pub fn write_listing(&self, out: &mut dyn Write) -> io::Result<()> {
        write_listing(&self.table, &self.config.scheduler, out)
    }

    /// Builds a scheduler over the loaded table without running it.
    pub fn into_scheduler(self) -> Scheduler {
        Scheduler::new(self.config.scheduler, self.table)
    }

    /// Runs the simulation to completion.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError`] raised during the run.
    pub fn run(self, sink: &mut dyn TraceSink) -> Result<SimStats, SimError> {
        self.into_scheduler().run(sink)
    }
}
