//! # Descriptor Parsing Tests
//!
//! Explicit (`c<N>`/`i`) and randomized (`<count>:<percent>`) grammars, and
//! workload selection between them.

use pretty_assertions::assert_eq;
use procsim_core::common::ConfigError;
use procsim_core::program::{Burst, ProgramDescriptor, Workload};
use rstest::rstest;

#[test]
fn test_explicit_bursts() {
    let desc = ProgramDescriptor::parse_explicit("c7,i,c1,i").unwrap();
    assert_eq!(
        desc,
        ProgramDescriptor::Explicit(vec![
            Burst::Compute(7),
            Burst::Io,
            Burst::Compute(1),
            Burst::Io
        ])
    );
    assert_eq!(desc.explicit_len(), Some(12));
}

#[test]
fn test_explicit_tolerates_spaces() {
    let desc = ProgramDescriptor::parse_explicit("c2, i").unwrap();
    assert_eq!(
        desc,
        ProgramDescriptor::Explicit(vec![Burst::Compute(2), Burst::Io])
    );
}

#[rstest]
#[case("x3", 'x')]
#[case("c2,d1", 'd')]
#[case("C4", 'C')]
fn test_explicit_bad_opcode(#[case] program: &str, #[case] letter: char) {
    let err = ProgramDescriptor::parse_explicit(program).unwrap_err();
    match err {
        ConfigError::BadOpcode { opcode, .. } => assert_eq!(opcode, letter),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case("c")]
#[case("cx")]
#[case("c1.5")]
#[case("c-2")]
fn test_explicit_bad_compute_count(#[case] program: &str) {
    assert!(matches!(
        ProgramDescriptor::parse_explicit(program),
        Err(ConfigError::BadComputeCount { .. })
    ));
}

#[rstest]
#[case("")]
#[case("c3,,i")]
#[case("c1,")]
fn test_explicit_empty_token(#[case] program: &str) {
    assert!(matches!(
        ProgramDescriptor::parse_explicit(program),
        Err(ConfigError::EmptyToken { .. })
    ));
}

#[test]
fn test_bad_opcode_message_names_expected_letters() {
    let err = ProgramDescriptor::parse_explicit("z").unwrap_err();
    assert!(err.to_string().contains("should be c or i"));
}

#[test]
fn test_randomized_descriptor() {
    let desc = ProgramDescriptor::parse_randomized("10:50").unwrap();
    assert_eq!(
        desc,
        ProgramDescriptor::Randomized {
            count: 10,
            cpu_percent: 50.0
        }
    );
    assert_eq!(desc.explicit_len(), None);
}

#[test]
fn test_randomized_fractional_percent() {
    let desc = ProgramDescriptor::parse_randomized("3:33.3").unwrap();
    assert_eq!(
        desc,
        ProgramDescriptor::Randomized {
            count: 3,
            cpu_percent: 33.3
        }
    );
}

#[rstest]
#[case("5")]
#[case("5:50:1")]
#[case("")]
fn test_randomized_wrong_field_count(#[case] descriptor: &str) {
    let err = ProgramDescriptor::parse_randomized(descriptor).unwrap_err();
    assert!(matches!(err, ConfigError::BadDescriptor { .. }));
    assert!(err.to_string().contains("must be <x:y>"));
}

#[rstest]
#[case("ten:50")]
#[case("-1:50")]
#[case(":50")]
fn test_randomized_bad_count(#[case] descriptor: &str) {
    assert!(matches!(
        ProgramDescriptor::parse_randomized(descriptor),
        Err(ConfigError::BadInstructionCount { .. })
    ));
}

#[rstest]
#[case("5:half")]
#[case("5:NaN")]
#[case("5:inf")]
#[case("5:")]
fn test_randomized_bad_percent(#[case] descriptor: &str) {
    assert!(matches!(
        ProgramDescriptor::parse_randomized(descriptor),
        Err(ConfigError::BadPercent { .. })
    ));
}

#[test]
fn test_workload_from_programs() {
    let workload = Workload::from_programs("c1:c2,i:i").unwrap();
    assert_eq!(workload.len(), 3);
    assert_eq!(
        workload.descriptors()[1],
        ProgramDescriptor::Explicit(vec![Burst::Compute(2), Burst::Io])
    );
}

#[test]
fn test_workload_from_process_list() {
    let workload = Workload::from_process_list("5:100,3:0").unwrap();
    assert_eq!(workload.len(), 2);
    assert!(matches!(
        workload.descriptors()[1],
        ProgramDescriptor::Randomized { count: 3, .. }
    ));
}

#[test]
fn test_workload_program_wins_over_process_list() {
    let workload = Workload::select("c4", "5:50,5:50").unwrap();
    assert_eq!(workload.len(), 1);
    assert_eq!(
        workload.descriptors()[0],
        ProgramDescriptor::Explicit(vec![Burst::Compute(4)])
    );
}

#[test]
fn test_workload_falls_back_to_process_list() {
    let workload = Workload::select("", "5:50,5:50").unwrap();
    assert_eq!(workload.len(), 2);
}

#[test]
fn test_workload_both_empty() {
    assert!(matches!(
        Workload::select("", ""),
        Err(ConfigError::EmptyWorkload)
    ));
}

#[test]
fn test_workload_first_error_reported() {
    let err = Workload::from_programs("c1:q2:c3").unwrap_err();
    assert!(matches!(err, ConfigError::BadOpcode { opcode: 'q', .. }));
}
