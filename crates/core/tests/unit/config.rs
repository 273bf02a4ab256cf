//! # Configuration Tests
//!
//! Tests for configuration defaults, deserialization, and validation.

use std::io::Write;

use issuesim_core::common::ConfigError;
use issuesim_core::config::*;
use issuesim_core::core::{HazardMode, IssueOrder};
use issuesim_core::isa::Operation;
use issuesim_core::SimError;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_cycles);
    assert_eq!(config.scheduler.mode, HazardMode::Implicit);
    assert_eq!(config.scheduler.issue_width, 1);
    assert_eq!(config.scheduler.issue_order, None);
    assert!(!config.scheduler.settle_after_retire);
    assert!(config.scheduler.derive_dependencies);
    assert_eq!(config.registers.count, 8);
    assert_eq!(config.registers.prefix, "R");
    assert!(config.registers.initial.is_empty());
    assert_eq!(config.latency.get(Operation::Mul), 2);
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.scheduler.issue_width, 1);
    assert_eq!(config.scheduler.effective_order(), IssueOrder::InOrder);
}

#[test]
fn test_partial_sections_keep_field_defaults() {
    let json = r#"{
        "general": { "trace_cycles": true },
        "scheduler": { "issue_width": 3, "issue_order": "first-fit" },
        "registers": { "count": 4, "initial": { "R1": -2 } },
        "latency": { "load": 5 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_cycles);
    assert_eq!(config.scheduler.mode, HazardMode::Implicit);
    assert_eq!(config.scheduler.issue_width, 3);
    assert_eq!(config.scheduler.effective_order(), IssueOrder::FirstFit);
    assert_eq!(config.registers.count, 4);
    assert_eq!(config.registers.prefix, "R");
    assert_eq!(config.registers.initial.get("R1"), Some(&-2));
    assert_eq!(config.latency.get(Operation::Load), 5);
    assert_eq!(config.latency.get(Operation::Store), 3);
}

#[test]
fn test_explicit_mode_defaults_to_first_fit() {
    let config = Config::from_json(r#"{ "scheduler": { "mode": "explicit" } }"#).unwrap();
    assert_eq!(config.scheduler.effective_order(), IssueOrder::FirstFit);
    let options = config.scheduler.options();
    assert_eq!(options.issue_width, 1);
    assert!(!options.settle_after_retire);
}

#[test]
fn test_order_override_wins_over_mode() {
    let json = r#"{ "scheduler": { "mode": "explicit", "issue_order": "in-order" } }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.scheduler.effective_order(), IssueOrder::InOrder);
}

#[test]
fn test_zero_issue_width_rejected() {
    let err = Config::from_json(r#"{ "scheduler": { "issue_width": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroIssueWidth));
}

#[test]
fn test_zero_latency_rejected() {
    let err = Config::from_json(r#"{ "latency": { "mul": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroLatency(ref op) if op == "mul"));
}

#[test]
fn test_oversized_latency_rejected() {
    let err = Config::from_json(r#"{ "latency": { "add": 18446744073709551615 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::LatencyTooLarge { ref op, cycles: u64::MAX, .. } if op == "add"
    ));
}

#[test]
fn test_zero_registers_rejected() {
    let err = Config::from_json(r#"{ "registers": { "count": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroRegisters));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(Config::from_json("{ scheduler"), Err(ConfigError::Json(_))));
    assert!(matches!(
        Config::from_json(r#"{ "scheduler": { "mode": "psychic" } }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "scheduler": {{ "issue_width": 2 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.scheduler.issue_width, 2);
}

#[test]
fn test_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}

#[test]
fn test_register_table_applies_initial_values() {
    let mut registers = RegisterConfig::default();
    let _ = registers.initial.insert("R3".into(), 11);
    let table = registers.build_table().unwrap();
    assert_eq!(table.len(), 8);
    assert_eq!(table.value("R3").unwrap(), 11);
    assert_eq!(table.value("R4").unwrap(), 0);
}

#[test]
fn test_register_table_rejects_unknown_initial_name() {
    let mut registers = RegisterConfig::default();
    let _ = registers.initial.insert("R8".into(), 1);
    assert!(matches!(
        registers.build_table(),
        Err(SimError::UnknownResource { instruction: None, ref name }) if name == "R8"
    ));
}
