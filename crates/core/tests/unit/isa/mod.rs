//! # ISA Tests
//!
//! Tests for the operation vocabulary, latency table, instruction model, and parser.

/// Instruction construction, display, and hazard queries.
pub mod instruction;


/// Program text parsing and error reporting.
pub mod parse;
