//! Operation latency table.
//!
//! The single place where an operation's cost in cycles is defined. The table
//! is a plain value handed to the parser and the simulator, so two simulations
//! with different cost models never interfere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    ADD_LATENCY, LOAD_LATENCY, MAX_LATENCY, MUL_LATENCY, STORE_LATENCY, SUB_LATENCY,
};
use crate::common::error::ConfigError;
use crate::isa::operation::Operation;

/// Maps each operation to its latency in cycles.
///
/// Deserializes from a JSON object keyed by mnemonic; operations missing from
/// the object keep their default latency.
///
/// ```
/// use issuesim_core::isa::latency::LatencyTable;
/// use issuesim_core::isa::operation::Operation;
///
/// let table: LatencyTable = serde_json::from_str(r#"{ "mul": 4 }"#).unwrap();
/// assert_eq!(table.get(Operation::Mul), 4);
/// assert_eq!(table.get(Operation::Add), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Operation, u64>", into = "BTreeMap<Operation, u64>")]
pub struct LatencyTable {
    cycles: BTreeMap<Operation, u64>,
}

impl LatencyTable {
    /// Creates the default table: add/sub 1, mul 2, load/store 3.
    pub fn new() -> Self {
        let cycles = Operation::ALL
            .iter()
            .map(|&op| (op, Self::default_latency(op)))
            .collect();
        Self { cycles }
    }

    /// Creates a table where every operation takes `cycles`.
    pub fn uniform(cycles: u64) -> Self {
        Self {
            cycles: Operation::ALL.iter().map(|&op| (op, cycles)).collect(),
        }
    }

    /// Returns a copy of the table with `op` set to `cycles`.
    #[must_use]
    pub fn with(mut self, op: Operation, cycles: u64) -> Self {
        let _ = self.cycles.insert(op, cycles);
        self
    }

    /// Latency of `op` in cycles.
    pub fn get(&self, op: Operation) -> u64 {
        self.cycles
            .get(&op)
            .copied()
            .unwrap_or_else(|| Self::default_latency(op))
    }

    /// Iterates `(operation, latency)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, u64)> + '_ {
        self.cycles.iter().map(|(&op, &cycles)| (op, cycles))
    }

    /// Rejects latencies of zero or above [`MAX_LATENCY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (op, cycles) in self.iter() {
            if cycles == 0 {
                return Err(ConfigError::ZeroLatency(op.mnemonic().to_string()));
            }
            if cycles > MAX_LATENCY {
                return Err(ConfigError::LatencyTooLarge {
                    op: op.mnemonic().to_string(),
                    cycles,
                    max: MAX_LATENCY,
                });
            }
        }
        Ok(())
    }

    const fn default_latency(op: Operation) -> u64 {
        match op {
            Operation::Add => ADD_LATENCY,
            Operation::Sub => SUB_LATENCY,
            Operation::Mul => MUL_LATENCY,
            Operation::Load => LOAD_LATENCY,
            Operation::Store => STORE_LATENCY,
        }
    }
}

impl Default for LatencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Operation, u64>> for LatencyTable {
    fn from(overrides: BTreeMap<Operation, u64>) -> Self {
        let mut table = Self::new();
        table.cycles.extend(overrides);
        table
    }
}

impl From<LatencyTable> for BTreeMap<Operation, u64> {
    fn from(table: LatencyTable) -> Self {
        table.cycles
    }
}
