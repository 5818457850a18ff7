//! Scheduler state machine.
//!
//! This module drives the simulation one tick at a time. Each tick performs, in order:
//! 1. **I/O completion:** Processes whose I/O ends this tick move `WAITING -> READY`; the
//!    completion policy decides whether they take the CPU at once.
//! 2. **Dispatch:** The current process, if running and not exhausted, executes one instruction.
//! 3. **Trace:** A [`TickRecord`] is handed to the trace sink.
//! 4. **I/O start:** An executed `IoStart` blocks the process and schedules its completion;
//!    under `SWITCH_ON_IO` the CPU moves on immediately.
//! 5. **End check:** A running process with no instructions left becomes `DONE` and the next
//!    ready process is selected.
//!
//! Selection without an explicit target is a round-robin scan starting just past the current
//! process and wrapping around, so ties are broken fairly. Forced selection (from the
//! completion policy) moves the target straight to `RUNNING`.

use tracing::{debug, info};

use super::clock::EventClock;
use super::process::ProcessState;
use super::table::ProcessTable;
use crate::common::{Pid, SimError};
use crate::config::{IoDonePolicy, SchedulerConfig, SwitchPolicy};
use crate::program::Opcode;
use crate::report::{ProcessCell, TickRecord, TraceSink};
use crate::stats::SimStats;

/// Uniprocessor scheduler: owns the process table, the event clock, and the current process.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    table: ProcessTable,
    clock: EventClock,
    current: Pid,
    stats: SimStats,
    started: bool,
}

impl Scheduler {
    /// Creates a scheduler over an already-populated process table.
    pub fn new(config: SchedulerConfig, table: ProcessTable) -> Self {
        let clock = EventClock::new(table.len());
        Self {
            config,
            table,
            clock,
            current: Pid(0),
            stats: SimStats::default(),
            started: false,
        }
    }

    /// Scheduler configuration.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The process table.
    pub const fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// The event clock.
    pub const fn clock(&self) -> &EventClock {
        &self.clock
    }

    /// The current process (the one running, or the last one that ran).
    pub const fn current(&self) -> Pid {
        self.current
    }

    /// Current tick; 0 before the first tick.
    pub const fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Returns `true` once every process is `DONE`.
    pub fn is_finished(&self) -> bool {
        self.table.count_active() == 0
    }

    /// Makes process 0 the running process. Idempotent; a no-op for an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTransition`] if process 0 is not `READY`.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        if self.table.is_empty() {
            return Ok(());
        }
        self.switch_to(Pid(0))
    }

    /// Runs until every process is `DONE`, reporting each tick to `sink`.
    ///
    /// An empty table finishes immediately with zeroed counters and no trace.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError`] raised by a tick or by the sink.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<SimStats, SimError> {
        if self.table.is_empty() {
            return Ok(self.stats);
        }

        self.start()?;
        sink.begin(self.table.len())?;
        info!(
            processes = self.table.len(),
            switch = %self.config.switch_policy,
            io_done = %self.config.io_done_policy,
            io_length = self.config.io_length,
            "simulation started"
        );

        while !self.is_finished() {
            self.tick(sink)?;
        }

        info!(
            ticks = self.stats.total_ticks,
            cpu_busy = self.stats.cpu_busy,
            io_busy = self.stats.io_busy,
            "simulation finished"
        );
        Ok(self.stats)
    }

    /// Advances the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTransition`] on a modeling defect, [`SimError::Stalled`] if
    /// no further progress is possible, [`SimError::ClockOverflow`] if an I/O would complete
    /// past the last representable tick, or [`SimError::Trace`] if the sink fails.
    pub fn tick(&mut self, sink: &mut dyn TraceSink) -> Result<(), SimError> {
        self.start()?;
        if self.table.is_empty() {
            return Ok(());
        }

        let now = self.clock.advance();

        let completions = self.clock.take_completions(now);
        let io_completed = !completions.is_empty();
        for pid in completions {
            self.complete_io(pid)?;
        }

        let executed = self.dispatch()?;

        let ios_in_flight = self.clock.in_flight(now);
        self.stats.total_ticks = now;
        if ios_in_flight > 0 {
            self.stats.io_busy += 1;
        }
        let record = self.snapshot(now, io_completed, executed, ios_in_flight);
        sink.record(&record)?;

        if executed.is_some_and(Opcode::starts_io) {
            self.start_io(now)?;
        }

        self.retire_if_done()?;

        if !self.is_finished() && !self.any_running() && !self.clock.has_pending() {
            return Err(SimError::Stalled {
                tick: now,
                active: self.table.count_active(),
            });
        }
        Ok(())
    }

    fn complete_io(&mut self, pid: Pid) -> Result<(), SimError> {
        self.table
            .set_state(pid, ProcessState::Waiting, ProcessState::Ready)?;
        debug!(tick = self.now(), pid = pid.index(), "io completed");

        match self.config.io_done_policy {
            IoDonePolicy::RunImmediate => {
                if self.current != pid && self.table.state(self.current)? == ProcessState::Running
                {
                    self.table
                        .set_state(self.current, ProcessState::Running, ProcessState::Ready)?;
                    debug!(
                        pid = self.current.index(),
                        by = pid.index(),
                        "preempted by io completion"
                    );
                }
                self.switch_to(pid)?;
            }
            IoDonePolicy::RunLater => {
                let runnable = self.table.count_runnable();
                let yield_on_end =
                    self.config.switch_policy == SwitchPolicy::SwitchOnEnd && runnable > 1;
                if yield_on_end || runnable == 1 {
                    self.switch_to(pid)?;
                }
            }
        }

        self.retire_if_done()
    }

    fn dispatch(&mut self) -> Result<Option<Opcode>, SimError> {
        let cur = self.current;
        if self.table.state(cur)? != ProcessState::Running
            || self.table.instruction_count(cur)? == 0
        {
            return Ok(None);
        }
        let opcode = self.table.pop_next_opcode(cur)?;
        self.stats.cpu_busy += 1;
        Ok(Some(opcode))
    }

    fn start_io(&mut self, now: u64) -> Result<(), SimError> {
        let cur = self.current;
        let io_length = self.config.io_length;
        let done_at = now
            .checked_add(io_length)
            .and_then(|t| t.checked_add(1))
            .ok_or(SimError::ClockOverflow {
                tick: now,
                io_length,
            })?;
        self.table
            .set_state(cur, ProcessState::Running, ProcessState::Waiting)?;
        self.clock.schedule_io(cur, done_at);
        debug!(tick = now, pid = cur.index(), done_at, "io issued");

        if self.config.switch_policy == SwitchPolicy::SwitchOnIo {
            self.select_next()?;
        }
        Ok(())
    }

    /// Retires the current process if it is running with nothing left to execute.
    fn retire_if_done(&mut self) -> Result<(), SimError> {
        let cur = self.current;
        if self.table.instruction_count(cur)? == 0
            && self.table.state(cur)? == ProcessState::Running
        {
            self.table
                .set_state(cur, ProcessState::Running, ProcessState::Done)?;
            self.select_next()?;
        }
        Ok(())
    }

    /// Round-robin scan for the first `READY` process after the current one.
    ///
    /// Leaves `current` unchanged when nothing is ready.
    fn select_next(&mut self) -> Result<(), SimError> {
        let count = self.table.len();
        let start = self.current.index();
        for offset in 1..=count {
            let pid = Pid((start + offset) % count);
            if self.table.state(pid)? == ProcessState::Ready {
                return self.switch_to(pid);
            }
        }
        debug!(tick = self.now(), "no ready process");
        Ok(())
    }

    /// Forced selection: makes `pid` current and moves it `READY -> RUNNING`.
    fn switch_to(&mut self, pid: Pid) -> Result<(), SimError> {
        self.table
            .set_state(pid, ProcessState::Ready, ProcessState::Running)?;
        self.current = pid;
        debug!(tick = self.now(), pid = pid.index(), "switched");
        Ok(())
    }

    fn any_running(&self) -> bool {
        self.table
            .iter()
            .any(|p| p.state() == ProcessState::Running)
    }

    fn snapshot(
        &self,
        tick: u64,
        io_completed: bool,
        executed: Option<Opcode>,
        ios_in_flight: usize,
    ) -> TickRecord {
        let cells = self
            .table
            .iter()
            .map(|p| match executed {
                Some(opcode) if p.pid() == self.current => ProcessCell::Run(opcode),
                _ => ProcessCell::State(p.state()),
            })
            .collect();
        TickRecord {
            tick,
            io_completed,
            cells,
            cpu_busy: executed.is_some(),
            ios_in_flight,
        }
    }
}
