//! # Resource Table Tests

use issuesim_core::core::ResourceTable;
use issuesim_core::isa::{InstrId, Instruction, LatencyTable, Operation};
use issuesim_core::SimError;
use rstest::rstest;

#[test]
fn test_custom_register_file() {
    let table = ResourceTable::with_registers(3, "F");
    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["F0", "F1", "F2"]);
    assert!(!table.contains("R0"));
}

#[test]
fn test_declaration_order_survives_double_digit_names() {
    let table = ResourceTable::with_registers(12, "R");
    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names[2], "R2");
    assert_eq!(names[10], "R10");
}

#[test]
fn test_execute_add_from_initial_values() {
    let mut table = ResourceTable::default();
    table.set_value("R0", 3).unwrap();
    table.set_value("R1", 4).unwrap();
    let inst = Instruction::arithmetic(InstrId(1), "R2", Operation::Add, "R0", "R1", &LatencyTable::new());
    assert_eq!(table.execute(&inst).unwrap(), Some(7));
    assert_eq!(table.value("R2").unwrap(), 7);
}

#[rstest]
#[case(Operation::Add, 10)]
#[case(Operation::Sub, 4)]
#[case(Operation::Mul, 21)]
fn test_execute_arithmetic(#[case] op: Operation, #[case] expected: i64) {
    let mut table = ResourceTable::default();
    table.set_value("R1", 7).unwrap();
    table.set_value("R2", 3).unwrap();
    let inst = Instruction::arithmetic(InstrId(1), "R3", op, "R1", "R2", &LatencyTable::new());
    let _ = table.execute(&inst).unwrap();
    assert_eq!(table.value("R3").unwrap(), expected);
}

#[test]
fn test_memory_operations_leave_values() {
    let mut table = ResourceTable::default();
    table.set_value("R5", 42).unwrap();
    let load = Instruction::memory(InstrId(1), "R5", Operation::Load, &LatencyTable::new());
    assert_eq!(table.execute(&load).unwrap(), None);
    assert_eq!(table.value("R5").unwrap(), 42);
}

#[test]
fn test_execute_unknown_destination() {
    let mut table = ResourceTable::default();
    let inst = Instruction::arithmetic(InstrId(4), "Z1", Operation::Add, "R0", "R0", &LatencyTable::new());
    assert!(matches!(
        table.execute(&inst),
        Err(SimError::UnknownResource { instruction: Some(InstrId(4)), ref name }) if name == "Z1"
    ));
}

#[test]
fn test_reservation_is_overwritten() {
    let mut table = ResourceTable::default();
    table.reserve("R2", 9).unwrap();
    table.reserve("R2", 3).unwrap();
    assert_eq!(table.busy_until("R2").unwrap(), 3);
    assert_eq!(table.get("R2").map(|r| r.busy_until), Some(3));
}

#[test]
fn test_dump_lists_every_register() {
    let mut table = ResourceTable::default();
    table.set_value("R7", -5).unwrap();
    let dump = table.dump();
    assert_eq!(dump.lines().count(), 2);
    assert!(dump.contains("R7"));
    assert!(dump.contains("-5"));
}
