//! # Statistics Tests
//!
//! Checks the counters the scheduler maintains during a run.

use crate::common::builder::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn test_counters_for_dependent_chain() {
    let program = ProgramBuilder::new().add("R1", "R0", "R0").mul("R2", "R1", "R1").build();
    let stats = TestContext::new().run(program).stats;

    assert_eq!(stats.cycles, 4);
    assert_eq!(stats.instructions_issued, 2);
    assert_eq!(stats.instructions_retired, 2);
    assert_eq!(stats.issue_slots_used, 2);
    assert_eq!(stats.max_in_flight, 1);
    // Cycles 3 and 4 have nothing left to issue.
    assert_eq!(stats.issue_stall_cycles, 0);
    assert!((stats.ipc() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_stall_cycles_counted_while_blocked() {
    let program = ProgramBuilder::new()
        .load("R1")
        .add("R2", "R1", "R0")
        .build();
    let stats = TestContext::new().run(program).stats;
    // Load issues at 1, retires at 4; the add waits through cycles 2 and 3.
    assert_eq!(stats.issue_stall_cycles, 2);
    assert_eq!(stats.cycles, 5);
}

#[test]
fn test_settle_cycles_counted() {
    let program = ProgramBuilder::new().add("R1", "R0", "R0").add("R2", "R0", "R0").build();
    let stats = TestContext::new().settle().run(program).stats;
    assert_eq!(stats.settle_cycles, 2);
}

#[test]
fn test_wide_issue_utilisation() {
    let program = ProgramBuilder::new()
        .add("R1", "R0", "R0")
        .add("R2", "R0", "R0")
        .add("R3", "R0", "R0")
        .add("R4", "R0", "R0")
        .build();
    let stats = TestContext::new().width(2).run(program).stats;
    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.max_in_flight, 2);
    assert!((stats.slot_utilisation() - 4.0 / 6.0).abs() < 1e-9);
}
