//! Per-cycle scheduler events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::isa::instruction::InstrId;

/// What happened in one simulated cycle.
///
/// Both id lists are sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleEvent {
    /// Cycle number, starting at 1.
    pub cycle: u64,
    /// Instructions issued in this cycle.
    pub issued: Vec<InstrId>,
    /// Instructions retired in this cycle.
    pub retired: Vec<InstrId>,
}

impl CycleEvent {
    /// Creates an empty event for `cycle`.
    pub const fn new(cycle: u64) -> Self {
        Self {
            cycle,
            issued: Vec::new(),
            retired: Vec::new(),
        }
    }

    /// Creates an event from id numbers, sorting both lists.
    pub fn from_ids(cycle: u64, issued: &[usize], retired: &[usize]) -> Self {
        let mut event = Self {
            cycle,
            issued: issued.iter().copied().map(InstrId).collect(),
            retired: retired.iter().copied().map(InstrId).collect(),
        };
        event.normalize();
        event
    }

    /// `true` if nothing was issued or retired.
    pub fn is_idle(&self) -> bool {
        self.issued.is_empty() && self.retired.is_empty()
    }

    pub(crate) fn normalize(&mut self) {
        self.issued.sort_unstable();
        self.retired.sort_unstable();
    }
}

impl fmt::Display for CycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ids: &[InstrId]| ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        write!(
            f,
            "cycle {}: issued [{}] retired [{}]",
            self.cycle,
            join(&self.issued),
            join(&self.retired)
        )
    }
}
