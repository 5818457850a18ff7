//! Process Table.
//!
//! A dense arena of [`Process`] records indexed by [`Pid`]. It provides:
//! 1. **Creation:** Sequential ids from zero, never reused.
//! 2. **Program access:** Append, peek, and pop of each process's instruction queue.
//! 3. **Guarded transitions:** Every state change asserts the prior state and the edge.
//! 4. **Census:** Active (not done) and runnable (ready or running) counts.

use tracing::debug;

use super::process::{Process, ProcessState};
use crate::common::{Pid, SimError};
use crate::program::Opcode;

/// Arena of processes; the vector index is the process id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessTable {
    procs: Vec<Process>,
}

impl ProcessTable {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self { procs: Vec::new() }
    }

    /// Appends a new `READY` process with an empty program and returns its id.
    pub fn create_process(&mut self) -> Pid {
        let pid = Pid(self.procs.len());
        self.procs.push(Process::new(pid));
        pid
    }

    /// Appends `opcode` to the end of `pid`'s program.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownProcess`] if `pid` does not exist.
    pub fn append_opcode(&mut self, pid: Pid, opcode: Opcode) -> Result<(), SimError> {
        self.get_mut(pid)?.instructions_mut().push_back(opcode);
        Ok(())
    }

    /// Number of instructions `pid` has left.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownProcess`] if `pid` does not exist.
    pub fn instruction_count(&self, pid: Pid) -> Result<usize, SimError> {
        Ok(self.get(pid)?.instructions().len())
    }

    /// The next instruction of `pid`, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownProcess`] if `pid` does not exist.
    pub fn peek_next_opcode(&self, pid: Pid) -> Result<Option<Opcode>, SimError> {
        Ok(self.get(pid)?.instructions().front().copied())
    }

    /// Consumes and returns the next instruction of `pid`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyProgram`] if `pid` has nothing left, or
    /// [`SimError::UnknownProcess`] if it does not exist.
    pub fn pop_next_opcode(&mut self, pid: Pid) -> Result<Opcode, SimError> {
        self.get_mut(pid)?
            .instructions_mut()
            .pop_front()
            .ok_or(SimError::EmptyProgram(pid))
    }

    /// Current state of `pid`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownProcess`] if `pid` does not exist.
    pub fn state(&self, pid: Pid) -> Result<ProcessState, SimError> {
        Ok(self.get(pid)?.state())
    }

    /// Moves `pid` from `expected` to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTransition`] if `pid` is not in `expected`, or if
    /// `expected -> next` is not a lifecycle edge. The state is left untouched on error.
    pub fn set_state(
        &mut self,
        pid: Pid,
        expected: ProcessState,
        next: ProcessState,
    ) -> Result<(), SimError> {
        let proc = self.get_mut(pid)?;
        let actual = proc.state();
        if actual != expected || !expected.can_transition_to(next) {
            return Err(SimError::InvalidTransition {
                pid,
                expected,
                actual,
                target: next,
            });
        }
        proc.set_state_unchecked(next);
        debug!(pid = pid.index(), from = %expected, to = %next, "state transition");
        Ok(())
    }

    /// Number of processes not yet `DONE`.
    pub fn count_active(&self) -> usize {
        self.procs
            .iter()
            .filter(|p| p.state() != ProcessState::Done)
            .count()
    }

    /// Number of processes `READY` or `RUNNING`.
    pub fn count_runnable(&self) -> usize {
        self.procs.iter().filter(|p| p.state().is_runnable()).count()
    }

    /// Number of processes in the table.
    pub fn len(&self) -> usize {
        self.procs.len()
    }

    /// Returns `true` if the table holds no processes.
    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// Looks up a process record.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownProcess`] if `pid` does not exist.
    pub fn get(&self, pid: Pid) -> Result<&Process, SimError> {
        self.procs
            .get(pid.index())
            .ok_or(SimError::UnknownProcess(pid))
    }

    fn get_mut(&mut self, pid: Pid) -> Result<&mut Process, SimError> {
        self.procs
            .get_mut(pid.index())
            .ok_or(SimError::UnknownProcess(pid))
    }

    /// Iterates over processes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.procs.iter()
    }
}
