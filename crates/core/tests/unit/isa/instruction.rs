//! # Instruction Tests

use issuesim_core::isa::{InstrId, Instruction, LatencyTable, Operation, OperationKind};

use crate::common::builder::ProgramBuilder;

#[test]
fn test_arithmetic_reads_both_operands() {
    let inst = Instruction::arithmetic(InstrId(1), "R3", Operation::Sub, "R1", "R2", &LatencyTable::new());
    assert!(inst.reads("R1"));
    assert!(inst.reads("R2"));
    assert!(!inst.reads("R3"));
    assert!(inst.writes("R3"));
    assert_eq!(inst.operation().kind(), OperationKind::Arithmetic);
}

#[test]
fn test_memory_has_no_operands() {
    let inst = Instruction::memory(InstrId(2), "R4", Operation::Load, &LatencyTable::new());
    assert!(inst.operands().is_empty());
    assert!(inst.operation().is_memory());
    assert_eq!(inst.operation().operand_count(), 0);
    assert_eq!(inst.to_string(), "R4 = Load");
}

#[test]
fn test_latency_taken_from_table() {
    let table = LatencyTable::new().with(Operation::Mul, 6);
    let program = ProgramBuilder::new().latencies(table).mul("R1", "R0", "R0").store("R2").build();
    assert_eq!(program[0].latency(), 6);
    assert_eq!(program[1].latency(), 3);
}

#[test]
fn test_without_destination_writes_nothing() {
    let inst = Instruction::memory(InstrId(1), "R1", Operation::Store, &LatencyTable::new()).without_destination();
    assert_eq!(inst.destination(), None);
    assert!(!inst.writes("R1"));
    assert_eq!(inst.to_string(), "Store");
}

#[test]
fn test_fresh_instruction_not_issued() {
    let program = ProgramBuilder::new().add("R1", "R0", "R0").deps(&[]).build();
    assert_eq!(program[0].issue_cycle(), None);
    assert!(program[0].dependencies().is_empty());
}
