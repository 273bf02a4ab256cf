//! # Trace Reporter Tests

use issuesim_core::sim::TraceReporter;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn test_single_issue_table() {
    let trace = TestContext::new().run_source("R1 = R0 + R0\nR2 = R1 * R1\n");
    let table = TraceReporter::new(&trace.program, 1).render_table(&trace.events);
    let rule = "-".repeat(60);
    let expected = [
        "Cycle     Issued Instruction            Retired Instruction",
        rule.as_str(),
        "1         1. R1 = R0 + R0",
        "2         2. R2 = R1 * R1               Instruction 1",
        "3",
        "4                                       Instruction 2",
        rule.as_str(),
        "Execution completed.",
    ];
    assert_eq!(table.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_two_wide_table_joins_entries() {
    let trace = TestContext::new().width(2).run_source("R1 = R0 + R0\nR2 = R0 + R0\n");
    let table = TraceReporter::new(&trace.program, 2).render_table(&trace.events);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[1].len(), 70);
    assert_eq!(lines[2], "1         1. R1 = R0 + R0  2. R2 = R0 + R0");
    assert!(lines[3].ends_with("Instruction 1 Instruction 2"));
}

#[test]
fn test_dependency_clause_not_shown_in_table() {
    let trace = TestContext::new()
        .explicit()
        .run_source("R1 = Load\nR2 = R1 + R1 ; deps: 1\n");
    let table = TraceReporter::new(&trace.program, 1).render_table(&trace.events);
    assert!(table.contains("2. R2 = R1 + R1"));
    assert!(!table.contains("deps"));
}

#[test]
fn test_json_report() {
    let trace = TestContext::new()
        .register("R0", 5)
        .run_source("R1 = R0 + R0\n");
    let json = TraceReporter::new(&trace.program, 1).render_json(&trace).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["cycles"], 2);
    assert_eq!(value["events"][0]["issued"], serde_json::json!([1]));
    assert_eq!(value["events"][1]["retired"], serde_json::json!([1]));
    assert_eq!(value["instructions"][0]["text"], "R1 = R0 + R0");
    assert_eq!(value["instructions"][0]["issue_cycle"], 1);
    assert_eq!(value["registers"][1]["name"], "R1");
    assert_eq!(value["registers"][1]["value"], 10);
    assert_eq!(value["stats"]["instructions_retired"], 1);
}
