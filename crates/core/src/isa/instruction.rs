//! Instruction model.
//!
//! An [`Instruction`] is created once, when the program is loaded, and is
//! read-only afterwards except for its issue cycle, which the scheduler
//! records exactly once.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{DEPS_KEYWORD, DEPS_SEPARATOR};
use crate::isa::latency::LatencyTable;
use crate::isa::operation::Operation;

/// Position of an instruction in program order, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrId(pub usize);

impl InstrId {
    /// Zero-based index into the program.
    pub const fn index(self) -> usize {
        self.0.saturating_sub(1)
    }

    /// Id of the instruction at zero-based `index`.
    pub const fn from_index(index: usize) -> Self {
        Self(index + 1)
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One register-transfer instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    id: InstrId,
    destination: Option<String>,
    operation: Operation,
    operands: Vec<String>,
    latency: u64,
    dependencies: BTreeSet<InstrId>,
    issue_cycle: Option<u64>,
}

impl Instruction {
    /// Creates `dest = left op right`, taking the latency from `latencies`.
    pub fn arithmetic(
        id: InstrId,
        dest: impl Into<String>,
        op: Operation,
        left: impl Into<String>,
        right: impl Into<String>,
        latencies: &LatencyTable,
    ) -> Self {
        Self {
            id,
            destination: Some(dest.into()),
            operation: op,
            operands: vec![left.into(), right.into()],
            latency: latencies.get(op),
            dependencies: BTreeSet::new(),
            issue_cycle: None,
        }
    }

    /// Creates `dest = Load` or `dest = Store`.
    pub fn memory(id: InstrId, dest: impl Into<String>, op: Operation, latencies: &LatencyTable) -> Self {
        Self {
            id,
            destination: Some(dest.into()),
            operation: op,
            operands: Vec::new(),
            latency: latencies.get(op),
            dependencies: BTreeSet::new(),
            issue_cycle: None,
        }
    }

    /// Replaces the explicit dependency set.
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = InstrId>) -> Self {
        self.dependencies = deps.into_iter().collect();
        self
    }

    /// Drops the destination, for operations that write nothing.
    #[must_use]
    pub fn without_destination(mut self) -> Self {
        self.destination = None;
        self
    }

    /// Program-order id.
    pub const fn id(&self) -> InstrId {
        self.id
    }

    /// Resource written by the instruction, if any.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// The operation performed.
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Resources read, in order.
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    /// Latency in cycles.
    pub const fn latency(&self) -> u64 {
        self.latency
    }

    /// Explicit predecessor ids.
    pub const fn dependencies(&self) -> &BTreeSet<InstrId> {
        &self.dependencies
    }

    /// Cycle in which the instruction was issued, once it has been.
    pub const fn issue_cycle(&self) -> Option<u64> {
        self.issue_cycle
    }

    /// `true` if the instruction reads `name`.
    pub fn reads(&self, name: &str) -> bool {
        self.operands.iter().any(|op| op == name)
    }

    /// `true` if the instruction writes `name`.
    pub fn writes(&self, name: &str) -> bool {
        self.destination.as_deref() == Some(name)
    }

    /// Records the issue cycle. Written once; later calls are ignored.
    pub(crate) fn mark_issued(&mut self, cycle: u64) {
        debug_assert!(self.issue_cycle.is_none(), "instruction {} issued twice", self.id);
        if self.issue_cycle.is_none() {
            self.issue_cycle = Some(cycle);
        }
    }

    pub(crate) fn set_dependencies(&mut self, deps: BTreeSet<InstrId>) {
        self.dependencies = deps;
    }
}

impl fmt::Display for Instruction {
    /// Canonical text form; parsing it yields an equal instruction.
    /// The alternate form (`{:#}`) leaves out the dependency clause.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dest) = &self.destination {
            write!(f, "{dest} = ")?;
        }
        match self.operands.as_slice() {
            [left, right] => write!(f, "{left} {} {right}", self.operation)?,
            _ => write!(f, "{}", self.operation)?,
        }
        if !f.alternate() && !self.dependencies.is_empty() {
            let ids: Vec<String> = self.dependencies.iter().map(ToString::to_string).collect();
            write!(f, " {DEPS_SEPARATOR} {DEPS_KEYWORD} {}", ids.join(", "))?;
        }
        Ok(())
    }
}
