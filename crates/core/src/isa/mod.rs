//! Instruction Set.
//!
//! This module defines the instruction vocabulary of the simulated machine. It provides:
//! 1. **Operations:** The table-driven operation vocabulary (`+ - *`, `Load`, `Store`).
//! 2. **Latency:** The operation-to-latency lookup table.
//! 3. **Instructions:** The immutable instruction record and its canonical text form.
//! 4. **Parsing:** The line-oriented program grammar.

/// Instruction record and program-order ids.
pub mod instruction;

/// Operation latency table.
pub mod latency;

/// Operation vocabulary and evaluation.
pub mod operation;

/// Program text parser.
pub mod parse;

pub use instruction::{InstrId, Instruction};
pub use latency::LatencyTable;
pub use operation::{Operation, OperationKind};
