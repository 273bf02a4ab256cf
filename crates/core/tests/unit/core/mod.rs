//! # Core Tests
//!
//! Tests for the resource table, the hazard resolvers, and the scheduler.


/// Resource values and reservations.
pub mod resources;
