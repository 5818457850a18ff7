//! Process record and lifecycle states.
//!
//! The legal lifecycle edges are:
//!
//! ```text
//! READY -> RUNNING        selected by the scheduler
//! RUNNING -> READY        preempted by an I/O completion (IO_RUN_IMMEDIATE)
//! RUNNING -> WAITING      issued an I/O
//! WAITING -> READY        I/O completed
//! RUNNING -> DONE         instruction sequence exhausted
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::common::Pid;
use crate::program::Opcode;

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    /// Eligible to run.
    Ready,
    /// Holding the CPU.
    Running,
    /// Blocked on an outstanding I/O.
    Waiting,
    /// Instruction sequence exhausted.
    Done,
}

impl ProcessState {
    /// Label shown in the trace; the waiting state prints as `BLOCKED`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Waiting => "BLOCKED",
            Self::Done => "DONE",
        }
    }

    /// Returns `true` if `self -> next` is an edge of the lifecycle diagram.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Ready, Self::Running)
                | (Self::Running, Self::Ready | Self::Waiting | Self::Done)
                | (Self::Waiting, Self::Ready)
        )
    }

    /// Ready or running.
    #[inline]
    pub const fn is_runnable(self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A simulated process: an id, the instructions it has left, and its state.
///
/// Instructions are consumed strictly from the front, so the program counter is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    instructions: VecDeque<Opcode>,
    state: ProcessState,
}

impl Process {
    pub(crate) const fn new(pid: Pid) -> Self {
        Self {
            pid,
            instructions: VecDeque::new(),
            state: ProcessState::Ready,
        }
    }

    /// This process's id.
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Remaining instructions, front first.
    pub const fn instructions(&self) -> &VecDeque<Opcode> {
        &self.instructions
    }

    pub(crate) fn instructions_mut(&mut self) -> &mut VecDeque<Opcode> {
        &mut self.instructions
    }

    pub(crate) fn set_state_unchecked(&mut self, state: ProcessState) {
        self.state = state;
    }
}
