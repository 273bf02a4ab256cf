//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Default register file shape and operation latencies.
//! 2. **Error Handling:** Parse, resource, scheduling, and configuration errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for parsing, scheduling, and configuration.
pub mod error;

pub use error::{ConfigError, ParseErrorKind, SimError};

/// Convenience result type for fallible simulator operations.
pub type SimResult<T> = Result<T, SimError>;
