//! Scheduler core.
//!
//! This module holds the only stateful part of the simulator:
//! 1. **Processes:** The process record and its lifecycle states.
//! 2. **Process Table:** The arena of processes with guarded state transitions.
//! 3. **Event Clock:** The tick counter and pending I/O completions.
//! 4. **Scheduler:** The per-tick state machine and its selection rules.

/// Event clock and pending I/O completions.
pub mod clock;

/// Process record and lifecycle states.
pub mod process;

/// The scheduler state machine.
pub mod scheduler;

/// Arena of processes indexed by id.
pub mod table;

pub use clock::EventClock;
pub use process::{Process, ProcessState};
pub use scheduler::Scheduler;
pub use table::ProcessTable;
