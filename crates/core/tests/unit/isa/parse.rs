//! # Parser Tests

use issuesim_core::common::ParseErrorKind;
use issuesim_core::isa::parse::{format_program, is_skippable, parse_instruction, parse_program};
use issuesim_core::isa::{InstrId, LatencyTable, Operation};
use issuesim_core::SimError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn reason(text: &str) -> ParseErrorKind {
    match parse_instruction(1, InstrId(1), text, &LatencyTable::new()) {
        Err(SimError::MalformedInstruction { reason, .. }) => reason,
        other => panic!("expected a malformed instruction, got {other:?}"),
    }
}

#[test]
fn test_unrecognized_operator_is_reported() {
    let err = parse_program("R1 = R0 &\n", &LatencyTable::new()).unwrap_err();
    match err {
        SimError::MalformedInstruction { line, text, reason } => {
            assert_eq!(line, 1);
            assert_eq!(text, "R1 = R0 &");
            assert_eq!(reason, ParseErrorKind::UnknownOperator("&".into()));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case("R1 R0 + R0", ParseErrorKind::MissingSeparator)]
#[case("= R0 + R0", ParseErrorKind::MissingDestination)]
#[case("R1 R2 = R0 + R0", ParseErrorKind::InvalidName("R1 R2".into()))]
#[case("R1 =", ParseErrorKind::MissingExpression)]
#[case("R1 = R0 / R0", ParseErrorKind::UnknownOperator("/".into()))]
#[case("R1 = R0 + R0 + R0", ParseErrorKind::Arity(5))]
#[case("R1 = R0 +", ParseErrorKind::Arity(2))]
#[case("R1 = Fetch", ParseErrorKind::Arity(1))]
#[case("R1 = Load ; deps: 1, two", ParseErrorKind::BadDependency("two".into()))]
fn test_malformed_lines(#[case] text: &str, #[case] expected: ParseErrorKind) {
    assert_eq!(reason(text), expected);
}

#[test]
fn test_program_numbers_instructions_and_lines() {
    let source = "# chain\nR1 = R0 + R0\n\nR2 = R1 * R1\nR3 = load\n";
    let program = parse_program(source, &LatencyTable::new()).unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program.iter().map(|i| i.id()).collect::<Vec<_>>(), [InstrId(1), InstrId(2), InstrId(3)]);
    assert_eq!(program[2].operation(), Operation::Load);

    let err = parse_program("R1 = R0 + R0\n\nR2 = R1 ^ R1\n", &LatencyTable::new()).unwrap_err();
    assert!(matches!(err, SimError::MalformedInstruction { line: 3, .. }));
}

#[test]
fn test_format_program_is_canonical() {
    let source = "R1 = R0 + R0\n  R2 = R1 * R1 ;deps: 1\nR3 = STORE\n";
    let program = parse_program(source, &LatencyTable::new()).unwrap();
    assert_eq!(
        format_program(&program),
        "R1 = R0 + R0\nR2 = R1 * R1 ; deps: 1\nR3 = Store\n"
    );
}

#[test]
fn test_empty_dependency_list_allowed() {
    let program = parse_program("R1 = Load ; deps:\n", &LatencyTable::new()).unwrap();
    assert!(program[0].dependencies().is_empty());
}

#[test]
fn test_skippable_lines() {
    assert!(is_skippable(""));
    assert!(is_skippable("   "));
    assert!(is_skippable("  # note"));
    assert!(!is_skippable("R1 = Load"));
}

#[test]
fn test_latency_resolved_at_parse_time() {
    let table = LatencyTable::new().with(Operation::Add, 4);
    let program = parse_program("R1 = R0 + R0\n", &table).unwrap();
    assert_eq!(program[0].latency(), 4);
}
