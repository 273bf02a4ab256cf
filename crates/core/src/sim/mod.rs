//! Simulation front-end.
//!
//! This module wraps the scheduling core for whole-program runs. It provides:
//! 1. **Loader:** Reads and parses program files.
//! 2. **Simulator:** Builds a configured scheduler and runs it to completion.
//! 3. **Trace:** Table and JSON rendering of the resulting events.

/// Program file loading.
pub mod loader;

/// Configured simulation driver.
pub mod simulator;

/// Trace rendering.
pub mod trace;

pub use simulator::{Simulator, Trace};
pub use trace::{TraceFormat, TraceReporter};
