//! # Scheduler Invariant Tests
//!
//! Property tests over random explicit programs and every policy combination.

use procsim_core::config::{IoDonePolicy, SwitchPolicy};
use procsim_core::program::{Burst, ProgramDescriptor, ProgramLoader, Workload};
use procsim_core::report::TraceLog;
use procsim_core::sched::{ProcessState, Scheduler};
use proptest::prelude::*;

use crate::common::harness::policies;

fn burst() -> impl Strategy<Value = Burst> {
    prop_oneof![(0usize..4).prop_map(Burst::Compute), Just(Burst::Io)]
}

fn workload() -> impl Strategy<Value = Workload> {
    prop::collection::vec(prop::collection::vec(burst(), 0..5), 1..5).prop_map(|programs| {
        Workload::new(
            programs
                .into_iter()
                .map(ProgramDescriptor::Explicit)
                .collect(),
        )
    })
}

fn switch_policy() -> impl Strategy<Value = SwitchPolicy> {
    prop_oneof![Just(SwitchPolicy::SwitchOnIo), Just(SwitchPolicy::SwitchOnEnd)]
}

fn io_done_policy() -> impl Strategy<Value = IoDonePolicy> {
    prop_oneof![Just(IoDonePolicy::RunLater), Just(IoDonePolicy::RunImmediate)]
}

proptest! {
    #[test]
    fn prop_run_terminates_with_consistent_counters(
        workload in workload(),
        switch in switch_policy(),
        io_done in io_done_policy(),
        io_length in 0u64..6,
    ) {
        let table = ProgramLoader::default().load_workload(&workload).unwrap();
        let loaded: usize = table.iter().map(|p| p.instructions().len()).sum();
        let mut trace = TraceLog::new();
        let mut sched = Scheduler::new(policies(switch, io_done, io_length), table);

        let stats = sched.run(&mut trace).unwrap();

        prop_assert_eq!(stats.cpu_busy, loaded as u64);
        prop_assert_eq!(stats.cpu_busy, trace.cpu_ticks());
        prop_assert_eq!(stats.io_busy, trace.io_ticks());
        prop_assert_eq!(stats.total_ticks, trace.records().len() as u64);
        prop_assert!(stats.cpu_busy <= stats.total_ticks);
        prop_assert!(stats.io_busy <= stats.total_ticks);
        prop_assert!(sched.table().iter().all(|p| p.state() == ProcessState::Done));
        prop_assert!(!sched.clock().has_pending());
    }

    #[test]
    fn prop_at_most_one_process_on_cpu(
        workload in workload(),
        switch in switch_policy(),
        io_done in io_done_policy(),
        io_length in 0u64..6,
    ) {
        let table = ProgramLoader::default().load_workload(&workload).unwrap();
        let mut trace = TraceLog::new();
        let _ = Scheduler::new(policies(switch, io_done, io_length), table)
            .run(&mut trace)
            .unwrap();

        for (i, record) in trace.records().iter().enumerate() {
            prop_assert!(record.running_cells() <= 1);
            prop_assert_eq!(record.tick, i as u64 + 1);
            prop_assert_eq!(record.cells.len(), trace.processes());
        }
    }

    #[test]
    fn prop_state_is_consistent_after_every_tick(
        workload in workload(),
        switch in switch_policy(),
        io_done in io_done_policy(),
        io_length in 0u64..6,
    ) {
        let table = ProgramLoader::default().load_workload(&workload).unwrap();
        let mut sched = Scheduler::new(policies(switch, io_done, io_length), table);
        let mut trace = TraceLog::new();
        sched.start().unwrap();

        while !sched.is_finished() {
            sched.tick(&mut trace).unwrap();
            let running = sched
                .table()
                .iter()
                .filter(|p| p.state() == ProcessState::Running)
                .count();
            prop_assert!(running <= 1);
            for p in sched.table().iter() {
                let waiting = p.state() == ProcessState::Waiting;
                prop_assert_eq!(waiting, !sched.clock().pending_for(p.pid()).is_empty());
            }
        }
    }
}
