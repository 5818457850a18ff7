//! Test harness: loads explicit programs, drives the scheduler, and renders traces.

use procsim_core::config::{IoDonePolicy, SchedulerConfig, SwitchPolicy};
use procsim_core::program::{ProgramLoader, Workload};
use procsim_core::report::{TableReporter, TraceLog, TraceSink};
use procsim_core::sched::{ProcessState, Scheduler};
use procsim_core::{Pid, SimStats};

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds a scheduler config from its three knobs.
pub const fn policies(
    switch_policy: SwitchPolicy,
    io_done_policy: IoDonePolicy,
    io_length: u64,
) -> SchedulerConfig {
    SchedulerConfig {
        switch_policy,
        io_done_policy,
        io_length,
    }
}

/// A scheduler loaded with explicit programs plus the trace it has produced so far.
pub struct TestContext {
    pub sched: Scheduler,
    pub trace: TraceLog,
}

impl TestContext {
    /// Loads `programs` (colon-separated explicit programs) under the default policies.
    pub fn new(programs: &str) -> Self {
        Self::with_config(programs, SchedulerConfig::default())
    }

    /// Loads `programs` under the given policies.
    pub fn with_policies(
        programs: &str,
        switch_policy: SwitchPolicy,
        io_done_policy: IoDonePolicy,
        io_length: u64,
    ) -> Self {
        Self::with_config(programs, policies(switch_policy, io_done_policy, io_length))
    }

    /// Loads `programs` under `config`.
    pub fn with_config(programs: &str, config: SchedulerConfig) -> Self {
        init_tracing();
        let workload = Workload::from_programs(programs).unwrap();
        let table = ProgramLoader::default().load_workload(&workload).unwrap();
        Self {
            sched: Scheduler::new(config, table),
            trace: TraceLog::new(),
        }
    }

    /// Runs to completion and returns the final counters.
    pub fn run(&mut self) -> SimStats {
        self.sched.run(&mut self.trace).unwrap()
    }

    /// Advances one tick.
    pub fn step(&mut self) {
        self.sched.tick(&mut self.trace).unwrap();
    }

    /// Current state of process `pid`.
    pub fn state(&self, pid: usize) -> ProcessState {
        self.sched.table().state(Pid(pid)).unwrap()
    }

    /// Rendered process cells of every tick so far.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.trace
            .records()
            .iter()
            .map(|r| r.cells.iter().map(ToString::to_string).collect())
            .collect()
    }

    /// Rendered process cells of one tick (1-based).
    pub fn row(&self, tick: u64) -> Vec<String> {
        let index = usize::try_from(tick - 1).unwrap();
        self.rows()[index].clone()
    }
}

/// Builds an expected row from string literals.
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

/// Runs `programs` under `config` through a `TableReporter` and returns the table text
/// followed by the stats block, with trailing whitespace trimmed from every line.
pub fn render(programs: &str, config: SchedulerConfig) -> String {
    init_tracing();
    let workload = Workload::from_programs(programs).unwrap();
    let table = ProgramLoader::default().load_workload(&workload).unwrap();
    let mut reporter = TableReporter::new(Vec::new());
    let stats = Scheduler::new(config, table)
        .run(&mut reporter as &mut dyn TraceSink)
        .unwrap();
    let mut out = reporter.into_inner();
    stats.write_to(&mut out).unwrap();
    trim_lines(&String::from_utf8(out).unwrap())
}

/// Trims trailing whitespace from every line.
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
