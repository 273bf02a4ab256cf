//! Simulator-wide constants.
//!
//! Baseline values used when a configuration does not override them.

/// Number of general registers in the default resource table (`R0`-`R7`).
pub const DEFAULT_REGISTER_COUNT: usize = 8;

/// Name prefix of the default registers.
pub const DEFAULT_REGISTER_PREFIX: &str = "R";

/// Default issue width (single issue).
pub const DEFAULT_ISSUE_WIDTH: usize = 1;

/// Latency of `add` in cycles.
pub const ADD_LATENCY: u64 = 1;

/// Latency of `sub` in cycles.
pub const SUB_LATENCY: u64 = 1;

/// Latency of `mul` in cycles.
pub const MUL_LATENCY: u64 = 2;

/// Latency of `load` in cycles.
pub const LOAD_LATENCY: u64 = 3;

/// Latency of `store` in cycles.
pub const STORE_LATENCY: u64 = 3;

/// Largest accepted operation latency in cycles.
pub const MAX_LATENCY: u64 = 1 << 32;

/// First simulated cycle. `busy_until` values below this mean "free".
pub const FIRST_CYCLE: u64 = 1;

/// Separator between the instruction text and its explicit dependency list.
pub const DEPS_SEPARATOR: char = ';';

/// Keyword that introduces the explicit dependency list.
pub const DEPS_KEYWORD: &str = "deps:";
