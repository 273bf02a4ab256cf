//! Issue/retire simulator library.
//!
//! This crate implements a cycle-by-cycle instruction issue simulator with the following:
//! 1. **ISA:** Register-transfer instructions, their operations, latencies, and text format.
//! 2. **Core:** Resource table, hazard resolvers, and the issue/retire scheduling engine.
//! 3. **Simulation:** Program loading, the simulator driver, and trace reporting.
//! 4. **Support:** Configuration, statistics, and error types.
//!
//! ```
//! use issuesim_core::{Config, Simulator};
//!
//! let trace = Simulator::from_source(&Config::default(), "R1 = R0 + R0\nR2 = R1 * R1\n")
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! assert_eq!(trace.cycles(), 4);
//! ```

/// Common types and constants (errors, defaults).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Scheduling core (resources, hazards, scheduler, events).
pub mod core;
/// Instruction set (operations, latencies, instructions, parser).
pub mod isa;
/// Loader, simulator driver, and trace reporter.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type returned by every fallible operation.
pub use crate::common::error::SimError;
/// Cycle-stepping engine.
pub use crate::core::scheduler::Scheduler;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::from_source`.
pub use crate::sim::simulator::Simulator;
