//! Program Loader.
//!
//! This module turns parsed descriptors into opcode sequences and populates the process table.
//! It performs:
//! 1. **Explicit expansion:** `c<N>` becomes N `Compute` opcodes, `i` becomes `IoStart, IoDone`.
//! 2. **Randomized expansion:** each of `count` draws is `Compute` if a uniform value in
//!    `[0, 100)` falls below the CPU percentage, and an `IoStart, IoDone` pair otherwise.
//! 3. **Table population:** one process per descriptor, ids assigned in order from zero.
//!
//! All randomness comes from one seeded stream owned by the loader and consumed in descriptor
//! order, so the same workload and seed always produce the same programs. The stream is never
//! touched once the run starts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::descriptor::{Burst, ProgramDescriptor, Workload};
use super::opcode::Opcode;
use crate::common::{Pid, SimError};
use crate::config::LoaderConfig;
use crate::sched::ProcessTable;

/// Expands program descriptors into opcodes using a single seedable PRNG.
#[derive(Debug, Clone)]
pub struct ProgramLoader {
    seed: u64,
    rng: StdRng,
}

impl ProgramLoader {
    /// Creates a loader whose PRNG is seeded with `seed`.
    ///
    /// This is the one seeding entry point; the CLI and [`LoaderConfig`] both go through it.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a loader from configuration.
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::with_seed(config.seed)
    }

    /// The seed this loader was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Expands one descriptor into its opcode sequence.
    ///
    /// Randomized descriptors advance the PRNG; explicit ones do not.
    pub fn expand(&mut self, descriptor: &ProgramDescriptor) -> Vec<Opcode> {
        let mut code = Vec::new();
        match descriptor {
            ProgramDescriptor::Explicit(bursts) => {
                for burst in bursts {
                    match *burst {
                        Burst::Compute(n) => code.extend(std::iter::repeat_n(Opcode::Compute, n)),
                        Burst::Io => code.extend([Opcode::IoStart, Opcode::IoDone]),
                    }
                }
            }
            ProgramDescriptor::Randomized { count, cpu_percent } => {
                for _ in 0..*count {
                    let draw: f64 = self.rng.gen_range(0.0..100.0);
                    if draw < *cpu_percent {
                        code.push(Opcode::Compute);
                    } else {
                        code.extend([Opcode::IoStart, Opcode::IoDone]);
                    }
                }
            }
        }
        code
    }

    /// Creates a new process in `table` and fills it with the expansion of `descriptor`.
    ///
    /// # Errors
    ///
    /// Propagates table errors; none occur for a freshly created process.
    pub fn load_into(
        &mut self,
        table: &mut ProcessTable,
        descriptor: &ProgramDescriptor,
    ) -> Result<Pid, SimError> {
        let pid = table.create_process();
        for opcode in self.expand(descriptor) {
            table.append_opcode(pid, opcode)?;
        }
        debug!(
            pid = pid.index(),
            instructions = table.instruction_count(pid)?,
            "loaded program"
        );
        Ok(pid)
    }

    /// Builds a fresh process table holding one process per descriptor of `workload`.
    ///
    /// # Errors
    ///
    /// Propagates table errors from [`ProgramLoader::load_into`].
    pub fn load_workload(&mut self, workload: &Workload) -> Result<ProcessTable, SimError> {
        let mut table = ProcessTable::new();
        for descriptor in workload.descriptors() {
            let _ = self.load_into(&mut table, descriptor)?;
        }
        Ok(table)
    }
}

impl Default for ProgramLoader {
    fn default() -> Self {
        Self::from_config(&LoaderConfig::default())
    }
}
