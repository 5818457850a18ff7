//! Process programs.
//!
//! This module covers everything between a textual program description and a
//! populated process table:
//! 1. **Opcodes:** The three instruction kinds a process can execute.
//! 2. **Descriptors:** The explicit and randomized grammars, parsed into a tagged enum.
//! 3. **Loader:** Expansion of descriptors into opcodes with a seedable PRNG.

/// Explicit and randomized program descriptors.
pub mod descriptor;

/// Descriptor expansion and process table population.
pub mod loader;

/// Instruction opcodes.
pub mod opcode;

pub use descriptor::{Burst, ProgramDescriptor, Workload};
pub use loader::ProgramLoader;
pub use opcode::Opcode;
