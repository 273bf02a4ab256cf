//! Operation vocabulary.
//!
//! Every operation the simulator understands is described by one row of
//! [`OPERATIONS`]: its textual token, its mnemonic (used as the latency table
//! key), and whether it is an arithmetic or a memory operation. Parsing,
//! formatting, and evaluation all go through this table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Register-to-register arithmetic with two operands (`DEST = L op R`).
    Arithmetic,
    /// Memory access with no register operands (`DEST = Load`).
    Memory,
}

/// A single operation of the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Integer addition (`+`).
    Add,
    /// Integer subtraction (`-`).
    Sub,
    /// Integer multiplication (`*`).
    Mul,
    /// Memory load (`Load`).
    Load,
    /// Memory store (`Store`).
    Store,
}

/// One row of the operation table.
#[derive(Debug, Clone, Copy)]
pub struct OperationInfo {
    /// The operation described by this row.
    pub operation: Operation,
    /// Token used in program text: the operator symbol or the memory keyword.
    pub token: &'static str,
    /// Lower-case name, used as the latency table key.
    pub mnemonic: &'static str,
    /// Arithmetic or memory.
    pub kind: OperationKind,
}

/// The operation vocabulary.
pub static OPERATIONS: [OperationInfo; 5] = [
    OperationInfo {
        operation: Operation::Add,
        token: "+",
        mnemonic: "add",
        kind: OperationKind::Arithmetic,
    },
    OperationInfo {
        operation: Operation::Sub,
        token: "-",
        mnemonic: "sub",
        kind: OperationKind::Arithmetic,
    },
    OperationInfo {
        operation: Operation::Mul,
        token: "*",
        mnemonic: "mul",
        kind: OperationKind::Arithmetic,
    },
    OperationInfo {
        operation: Operation::Load,
        token: "Load",
        mnemonic: "load",
        kind: OperationKind::Memory,
    },
    OperationInfo {
        operation: Operation::Store,
        token: "Store",
        mnemonic: "store",
        kind: OperationKind::Memory,
    },
];

impl Operation {
    /// All operations, in table order.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Load, Self::Store];

    /// Returns this operation's row of [`OPERATIONS`].
    pub fn info(self) -> &'static OperationInfo {
        &OPERATIONS[self as usize]
    }

    /// Token used in program text.
    pub fn token(self) -> &'static str {
        self.info().token
    }

    /// Lower-case mnemonic.
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Arithmetic or memory.
    pub fn kind(self) -> OperationKind {
        self.info().kind
    }

    /// `true` for load and store.
    pub fn is_memory(self) -> bool {
        matches!(self.kind(), OperationKind::Memory)
    }

    /// Number of register operands the operation reads.
    pub fn operand_count(self) -> usize {
        match self.kind() {
            OperationKind::Arithmetic => 2,
            OperationKind::Memory => 0,
        }
    }

    /// Looks up an arithmetic operator symbol (`+`, `-`, `*`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|row| row.kind == OperationKind::Arithmetic && row.token == symbol)
            .map(|row| row.operation)
    }

    /// Looks up a memory keyword (`Load`, `Store`), ignoring case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|row| row.kind == OperationKind::Memory && row.token.eq_ignore_ascii_case(word))
            .map(|row| row.operation)
    }

    /// Evaluates the operation on operand values.
    ///
    /// Arithmetic wraps on overflow. Memory operations produce no register
    /// value and return `None`, as does an arithmetic operation given the
    /// wrong number of operands.
    pub fn evaluate(self, operands: &[i64]) -> Option<i64> {
        let &[left, right] = operands else {
            return None;
        };
        match self {
            Self::Add => Some(left.wrapping_add(right)),
            Self::Sub => Some(left.wrapping_sub(right)),
            Self::Mul => Some(left.wrapping_mul(right)),
            Self::Load | Self::Store => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
