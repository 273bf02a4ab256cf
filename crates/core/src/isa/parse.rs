//! Program text parser.
//!
//! Converts the line-oriented program format into [`Instruction`]s:
//!
//! ```text
//! R1 = R0 + R0
//! R2 = R1 * R1 ; deps: 1
//! R3 = Load
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Instructions are
//! numbered 1..N in order of appearance; errors report the 1-based source line.

use std::collections::BTreeSet;

use crate::common::constants::{DEPS_KEYWORD, DEPS_SEPARATOR};
use crate::common::error::{ParseErrorKind, SimError};
use crate::isa::instruction::{InstrId, Instruction};
use crate::isa::latency::LatencyTable;
use crate::isa::operation::Operation;

/// `true` for lines the loader ignores (blank or `#` comment).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parses one instruction line.
///
/// # Arguments
///
/// * `line` - 1-based source line, used for error reporting.
/// * `id` - Program-order id to give the instruction.
/// * `text` - The line itself.
/// * `latencies` - Cost model used to resolve the operation's latency.
pub fn parse_instruction(
    line: usize,
    id: InstrId,
    text: &str,
    latencies: &LatencyTable,
) -> Result<Instruction, SimError> {
    parse_line(id, text, latencies).map_err(|reason| SimError::malformed(line, text, reason))
}

/// Parses a whole program, skipping blank and comment lines.
pub fn parse_program(source: &str, latencies: &LatencyTable) -> Result<Vec<Instruction>, SimError> {
    let mut program = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        if is_skippable(text) {
            continue;
        }
        let id = InstrId::from_index(program.len());
        program.push(parse_instruction(idx + 1, id, text, latencies)?);
    }
    Ok(program)
}

/// Renders a program back to text, one canonical instruction per line.
pub fn format_program(program: &[Instruction]) -> String {
    let mut out = String::new();
    for inst in program {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}

fn parse_line(id: InstrId, text: &str, latencies: &LatencyTable) -> Result<Instruction, ParseErrorKind> {
    let (body, deps) = match text.split_once(DEPS_SEPARATOR) {
        Some((body, clause)) => (body, parse_dependencies(clause)?),
        None => (text, BTreeSet::new()),
    };

    let (dest, expr) = body.split_once('=').ok_or(ParseErrorKind::MissingSeparator)?;
    let dest = dest.trim();
    if dest.is_empty() {
        return Err(ParseErrorKind::MissingDestination);
    }
    if dest.split_whitespace().count() != 1 {
        return Err(ParseErrorKind::InvalidName(dest.to_string()));
    }

    let tokens: Vec<&str> = expr.split_whitespace().collect();
    let inst = match tokens.as_slice() {
        [] => return Err(ParseErrorKind::MissingExpression),
        [word] => match Operation::from_keyword(word) {
            Some(op) => Instruction::memory(id, dest, op, latencies),
            None => return Err(ParseErrorKind::Arity(1)),
        },
        [left, symbol, rest @ ..] => {
            let op = Operation::from_symbol(symbol)
                .ok_or_else(|| ParseErrorKind::UnknownOperator((*symbol).to_string()))?;
            let [right] = rest else {
                return Err(ParseErrorKind::Arity(tokens.len()));
            };
            Instruction::arithmetic(id, dest, op, *left, *right, latencies)
        }
    };

    Ok(inst.with_dependencies(deps))
}

fn parse_dependencies(clause: &str) -> Result<BTreeSet<InstrId>, ParseErrorKind> {
    let list = clause
        .trim()
        .strip_prefix(DEPS_KEYWORD)
        .ok_or_else(|| ParseErrorKind::BadDependency(clause.trim().to_string()))?;

    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.parse::<usize>() {
            Ok(n) if n > 0 => Ok(InstrId(n)),
            _ => Err(ParseErrorKind::BadDependency(entry.to_string())),
        })
        .collect()
}
