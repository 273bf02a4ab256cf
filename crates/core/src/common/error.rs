//! Simulation and parse error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Parse Errors:** Malformed program lines, with the source line and a reason.
//! 2. **Resource Errors:** Operand or destination names missing from the resource table.
//! 3. **Scheduling Errors:** Dependency cycles and run-time deadlock detection.
//! 4. **Configuration Errors:** Invalid widths, latencies, and register files.

use std::path::PathBuf;

use thiserror::Error;

use crate::isa::instruction::InstrId;

/// Reason a program line could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The line has no `=` between destination and expression.
    #[error("missing '=' between destination and expression")]
    MissingSeparator,

    /// Nothing precedes the `=`.
    #[error("missing destination")]
    MissingDestination,

    /// The destination is not a single word.
    #[error("invalid resource name '{0}'")]
    InvalidName(String),

    /// Nothing follows the `=`.
    #[error("missing expression")]
    MissingExpression,

    /// The operator token is not in the operation vocabulary.
    #[error("unrecognized operator '{0}'")]
    UnknownOperator(String),

    /// An arithmetic expression does not have exactly two operands around one operator.
    #[error("expected 'LEFT OP RIGHT', found {0} token(s)")]
    Arity(usize),

    /// An entry of the `deps:` clause is not a positive instruction id.
    #[error("invalid dependency '{0}'")]
    BadDependency(String),
}

/// Configuration validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The issue width must allow at least one instruction per cycle.
    #[error("issue width must be at least 1")]
    ZeroIssueWidth,

    /// Every operation must take at least one cycle.
    #[error("operation '{0}' must have non-zero latency")]
    ZeroLatency(String),

    /// A latency exceeds [`crate::common::constants::MAX_LATENCY`].
    #[error("operation '{op}' latency {cycles} exceeds the maximum of {max}")]
    LatencyTooLarge {
        /// Operation mnemonic.
        op: String,
        /// Configured latency.
        cycles: u64,
        /// Largest accepted latency.
        max: u64,
    },

    /// The register file must not be empty.
    #[error("register file must contain at least one register")]
    ZeroRegisters,

    /// The configuration file is not valid JSON for [`crate::config::Config`].
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a program or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A program line does not follow the instruction grammar.
    #[error("line {line}: malformed instruction '{text}': {reason}")]
    MalformedInstruction {
        /// 1-based source line.
        line: usize,
        /// Offending line, trimmed.
        text: String,
        /// What was wrong with it.
        reason: ParseErrorKind,
    },

    /// A resource name does not exist in the resource table.
    #[error("{}unknown resource '{name}'", instruction_prefix(.instruction))]
    UnknownResource {
        /// Instruction that referenced the name, if any.
        instruction: Option<InstrId>,
        /// The unknown name.
        name: String,
    },

    /// An explicit dependency does not refer to a strictly earlier instruction.
    #[error("instruction {instruction}: dependency on {dependency} is not an earlier instruction")]
    DependencyCycle {
        /// Instruction carrying the bad dependency.
        instruction: InstrId,
        /// The dependency id.
        dependency: InstrId,
    },

    /// No instruction can ever become ready again.
    #[error("scheduling deadlock at cycle {cycle}: instruction {blocked} can never issue")]
    SchedulingDeadlock {
        /// Cycle in which the stall was detected.
        cycle: u64,
        /// Oldest instruction still waiting.
        blocked: InstrId,
    },

    /// Instruction ids are not 1..N in program order.
    #[error("instruction at position {position} has id {found}")]
    OutOfOrderId {
        /// 1-based position in the program.
        position: usize,
        /// Id found there.
        found: InstrId,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A trace could not be serialized.
    #[error("could not render trace: {0}")]
    Render(#[source] serde_json::Error),

    /// A program or configuration file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn instruction_prefix(instruction: &Option<InstrId>) -> String {
    instruction.map_or_else(String::new, |id| format!("instruction {id}: "))
}

impl SimError {
    /// Builds a [`SimError::MalformedInstruction`] for `text` on `line`.
    pub(crate) fn malformed(line: usize, text: &str, reason: ParseErrorKind) -> Self {
        Self::MalformedInstruction {
            line,
            text: text.trim().to_string(),
            reason,
        }
    }

    /// Fills in the instruction of an [`SimError::UnknownResource`] raised
    /// without one. Other errors pass through unchanged.
    #[must_use]
    pub fn attach(self, id: InstrId) -> Self {
        match self {
            Self::UnknownResource {
                instruction: None,
                name,
            } => Self::UnknownResource {
                instruction: Some(id),
                name,
            },
            other => other,
        }
    }
}
