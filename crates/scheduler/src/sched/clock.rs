//! Event clock and pending I/O completions.
//!
//! The clock starts before tick 1 and advances once per scheduler loop iteration.
//! Each process owns a list of future ticks at which one of its I/Os completes.

use crate::common::Pid;

/// Discrete simulation clock plus per-process pending I/O completion ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventClock {
    now: u64,
    pending: Vec<Vec<u64>>,
}

impl EventClock {
    /// Creates a clock at tick 0 tracking `processes` processes.
    pub fn new(processes: usize) -> Self {
        Self {
            now: 0,
            pending: vec![Vec::new(); processes],
        }
    }

    /// Current tick; 0 before the first advance.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Advances to the next tick and returns it.
    pub fn advance(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// Records that an I/O of `pid` completes at tick `at`.
    pub fn schedule_io(&mut self, pid: Pid, at: u64) {
        if let Some(list) = self.pending.get_mut(pid.index()) {
            list.push(at);
        }
    }

    /// Removes and returns, in id order, every process with an I/O completing at `tick`.
    pub fn take_completions(&mut self, tick: u64) -> Vec<Pid> {
        let mut done = Vec::new();
        for (index, list) in self.pending.iter_mut().enumerate() {
            let before = list.len();
            list.retain(|&t| t != tick);
            if list.len() != before {
                done.push(Pid(index));
            }
        }
        done
    }

    /// Number of I/Os still outstanding after `tick`.
    pub fn in_flight(&self, tick: u64) -> usize {
        self.pending
            .iter()
            .flatten()
            .filter(|&&t| t > tick)
            .count()
    }

    /// Returns `true` if any I/O is still pending.
    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|list| !list.is_empty())
    }

    /// Pending completion ticks of `pid`.
    pub fn pending_for(&self, pid: Pid) -> &[u64] {
        self.pending.get(pid.index()).map_or(&[], Vec::as_slice)
    }
}
