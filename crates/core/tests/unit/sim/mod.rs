//! # Simulation Tests
//!
//! Tests for program loading, the simulator driver, and trace rendering.



/// Table and JSON rendering.
pub mod trace;
