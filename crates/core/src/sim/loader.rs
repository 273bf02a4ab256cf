//! Program Loader.
//!
//! This module reads program files from disk. It performs:
//! 1. **Source loading:** Reads the program text, reporting the path on failure.
//! 2. **Parsing:** Turns the text into numbered instructions with the given cost model.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::SimError;
use crate::isa::instruction::Instruction;
use crate::isa::latency::LatencyTable;
use crate::isa::parse::parse_program;

/// Reads a program file into a string.
///
/// # Arguments
///
/// * `path` - Path to the program text file.
///
/// # Returns
///
/// The file contents, or `SimError::Io` naming the path.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, SimError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the program text file.
/// * `latencies` - Cost model resolving each operation's latency.
pub fn load_program(path: impl AsRef<Path>, latencies: &LatencyTable) -> Result<Vec<Instruction>, SimError> {
    let path = path.as_ref();
    let program = parse_program(&load_source(path)?, latencies)?;
    debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}
