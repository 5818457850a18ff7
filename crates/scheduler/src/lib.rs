//! Uniprocessor process scheduling simulator library.
//!
//! This crate simulates, tick by tick, a fixed set of processes sharing one virtual CPU:
//! 1. **Programs:** Opcodes, program descriptors, and the seedable program loader.
//! 2. **Scheduler:** Process table, event clock, and the scheduler state machine.
//! 3. **Simulation:** A top-level simulator that loads a workload and drives the run.
//! 4. **Reporting:** Per-tick trace sinks, the instruction listing, and utilization statistics.
//! 5. **Configuration:** Switch and I/O-completion policies, I/O length, and loader seed.

/// Common types (process ids, errors).
pub mod common;
/// Simulator configuration (defaults, policy enums, JSON loading).
pub mod config;
/// Opcodes, program descriptors, and the program loader.
pub mod program;
/// Trace sinks and the instruction listing.
pub mod report;
/// Scheduler core (process table, event clock, state machine).
pub mod sched;
/// Top-level simulator tying the loader to the scheduler.
pub mod sim;
/// Utilization statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::SimError;
/// Process identifier; also the index into the process table.
pub use crate::common::Pid;
/// Scheduler state machine.
pub use crate::sched::Scheduler;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Final counters of a run.
pub use crate::stats::SimStats;
