//! # Configuration Tests
//!
//! Defaults, policy name parsing, and JSON deserialization.

use std::io::Write;

use procsim_core::common::ConfigError;
use procsim_core::config::*;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.scheduler.switch_policy, SwitchPolicy::SwitchOnIo);
    assert_eq!(config.scheduler.io_done_policy, IoDonePolicy::RunLater);
    assert_eq!(config.scheduler.io_length, 5);
    assert_eq!(config.loader.seed, 42);
}

#[rstest]
#[case("SWITCH_ON_IO", SwitchPolicy::SwitchOnIo)]
#[case("SWITCH_ON_END", SwitchPolicy::SwitchOnEnd)]
fn test_switch_policy_names(#[case] name: &str, #[case] policy: SwitchPolicy) {
    assert_eq!(name.parse::<SwitchPolicy>().unwrap(), policy);
    assert_eq!(policy.to_string(), name);
}

#[rstest]
#[case("IO_RUN_LATER", IoDonePolicy::RunLater)]
#[case("IO_RUN_IMMEDIATE", IoDonePolicy::RunImmediate)]
fn test_io_done_policy_names(#[case] name: &str, #[case] policy: IoDonePolicy) {
    assert_eq!(name.parse::<IoDonePolicy>().unwrap(), policy);
    assert_eq!(policy.to_string(), name);
}

#[rstest]
#[case("switch_on_io")]
#[case("SWITCH_ON_IDLE")]
#[case("")]
fn test_unknown_switch_policy(#[case] name: &str) {
    let err = name.parse::<SwitchPolicy>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownSwitchPolicy(_)));
    assert!(err.to_string().contains("SWITCH_ON_IO or SWITCH_ON_END"));
}

#[test]
fn test_unknown_io_done_policy() {
    let err = "IO_RUN_NEVER".parse::<IoDonePolicy>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownIoDonePolicy(_)));
    assert!(err.to_string().contains("IO_RUN_LATER or IO_RUN_IMMEDIATE"));
}

#[test]
fn test_json_partial_uses_defaults() {
    let config = Config::from_json_str(r#"{ "scheduler": { "io_length": 2 } }"#).unwrap();
    assert_eq!(config.scheduler.io_length, 2);
    assert_eq!(config.scheduler.switch_policy, SwitchPolicy::SwitchOnIo);
    assert_eq!(config.loader.seed, 42);
}

#[test]
fn test_json_empty_object_is_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn test_json_unknown_policy_rejected() {
    let err = Config::from_json_str(r#"{ "scheduler": { "switch_policy": "SOMETIMES" } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::ConfigParse(_)));
}

#[test]
fn test_json_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "scheduler": {{ "io_done_policy": "IO_RUN_IMMEDIATE" }}, "loader": {{ "seed": 3 }} }}"#
    )
    .unwrap();
    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.scheduler.io_done_policy, IoDonePolicy::RunImmediate);
    assert_eq!(config.loader.seed, 3);
}

#[test]
fn test_json_file_missing() {
    let err = Config::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::ConfigFile { .. }));
}

#[test]
fn test_describe_switch_on_io_run_later() {
    let text = SchedulerConfig::default().describe();
    assert_eq!(
        text,
        "Important behaviors:\n  System will switch when the current process is FINISHED or ISSUES AN IO\n  \
         After IOs, the process issuing the IO will run LATER (when it is its turn)\n"
    );
}

#[test]
fn test_describe_switch_on_end_run_immediate() {
    let config = SchedulerConfig {
        switch_policy: SwitchPolicy::SwitchOnEnd,
        io_done_policy: IoDonePolicy::RunImmediate,
        io_length: 5,
    };
    let text = config.describe();
    assert!(text.contains("when the current process is FINISHED\n"));
    assert!(text.contains("will run IMMEDIATELY"));
}
