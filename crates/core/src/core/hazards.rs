//! Hazard Resolution.
//!
//! This module decides when a pending instruction may issue. It provides:
//! 1. **Resolver Interface:** The [`HazardResolver`] trait consulted by the scheduler every cycle.
//! 2. **Implicit Hazards:** Readiness from register reservations (`busy_until`) with latency-gated retirement.
//! 3. **Explicit Dependencies:** Readiness from declared predecessor ids with coincident issue and retirement.
//! 4. **Classification:** RAW/WAR/WAW detection between two instructions and dependency derivation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;
use crate::core::resources::ResourceTable;
use crate::isa::instruction::{InstrId, Instruction};

/// How readiness is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardMode {
    /// Register reservations; retire `latency` cycles after issue.
    #[default]
    Implicit,
    /// Declared dependency lists; retire in the issue cycle.
    Explicit,
}

impl HazardMode {
    /// Builds the resolver for this mode.
    pub fn resolver(self) -> Box<dyn HazardResolver> {
        match self {
            Self::Implicit => Box::new(ImplicitHazards),
            Self::Explicit => Box::new(ExplicitDependencies),
        }
    }
}

/// Class of a data hazard between an earlier and a later instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardKind {
    /// Read after write: the later instruction reads what the earlier one writes.
    Raw,
    /// Write after read: the later instruction writes what the earlier one reads.
    War,
    /// Write after write: both write the same resource.
    Waw,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "RAW",
            Self::War => "WAR",
            Self::Waw => "WAW",
        })
    }
}

/// Lists the hazards `later` has on `earlier`, in `RAW, WAR, WAW` order.
pub fn classify(earlier: &Instruction, later: &Instruction) -> Vec<HazardKind> {
    let mut kinds = Vec::new();
    if earlier.destination().is_some_and(|dest| later.reads(dest)) {
        kinds.push(HazardKind::Raw);
    }
    if let Some(dest) = later.destination() {
        if earlier.reads(dest) {
            kinds.push(HazardKind::War);
        }
        if earlier.writes(dest) {
            kinds.push(HazardKind::Waw);
        }
    }
    kinds
}

/// Fills every instruction's dependency set with the earlier instructions
/// it has a RAW, WAR or WAW hazard on.
pub fn derive_dependencies(program: &mut [Instruction]) {
    for later in 0..program.len() {
        let deps: BTreeSet<InstrId> = program[..later]
            .iter()
            .filter(|earlier| !classify(earlier, &program[later]).is_empty())
            .map(Instruction::id)
            .collect();
        program[later].set_dependencies(deps);
    }
}

/// Read-only view of the scheduler handed to a resolver.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerState<'a> {
    /// Cycle being simulated.
    pub cycle: u64,
    /// Resource reservations.
    pub resources: &'a ResourceTable,
    /// Retired instructions and their retire cycles.
    pub retired: &'a BTreeMap<InstrId, u64>,
    /// The whole program, indexed by `InstrId::index`.
    pub program: &'a [Instruction],
    /// Program indices of unissued instructions older than the candidate.
    pub older_pending: &'a [usize],
}

impl SchedulerState<'_> {
    /// Iterates the unissued instructions older than the candidate.
    pub fn older(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.older_pending.iter().map(|&index| &self.program[index])
    }
}

/// Strategy deciding readiness and completion of instructions.
///
/// The scheduler consults the resolver for each pending instruction it
/// considers, in program order. The resolver never mutates state; the
/// scheduler performs the reservation after a positive answer.
pub trait HazardResolver: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks the whole program before the first cycle.
    fn validate(&self, _program: &[Instruction]) -> Result<(), SimError> {
        Ok(())
    }

    /// Returns `true` if `inst` may issue in `state.cycle`.
    ///
    /// # Errors
    ///
    /// `UnknownResource` when the instruction names a resource missing from the table.
    fn is_ready(&self, inst: &Instruction, state: &SchedulerState<'_>) -> Result<bool, SimError>;

    /// Cycle in which `inst` retires when issued in `issue_cycle`.
    fn retire_cycle(&self, inst: &Instruction, issue_cycle: u64) -> u64;
}

/// Register-reservation hazards.
///
/// An instruction is ready when none of its operands has a pending writer.
/// It retires `latency` cycles after it issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitHazards;

impl HazardResolver for ImplicitHazards {
    fn name(&self) -> &'static str {
        "implicit"
    }

    fn is_ready(&self, inst: &Instruction, state: &SchedulerState<'_>) -> Result<bool, SimError> {
        for operand in inst.operands() {
            if !state.resources.is_free_at(operand, state.cycle)? {
                return Ok(false);
            }
        }
        // Only reachable with first-fit order: never overtake an older
        // instruction this one conflicts with.
        Ok(state.older().all(|older| classify(older, inst).is_empty()))
    }

    fn retire_cycle(&self, inst: &Instruction, issue_cycle: u64) -> u64 {
        issue_cycle.saturating_add(inst.latency())
    }
}

/// Declared-dependency scheduling.
///
/// An instruction is ready once every listed predecessor retired in an
/// earlier cycle. Issue and retirement coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitDependencies;

impl HazardResolver for ExplicitDependencies {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn validate(&self, program: &[Instruction]) -> Result<(), SimError> {
        for inst in program {
            if let Some(&dependency) = inst
                .dependencies()
                .iter()
                .find(|dep| dep.0 == 0 || **dep >= inst.id())
            {
                return Err(SimError::DependencyCycle {
                    instruction: inst.id(),
                    dependency,
                });
            }
        }
        Ok(())
    }

    fn is_ready(&self, inst: &Instruction, state: &SchedulerState<'_>) -> Result<bool, SimError> {
        Ok(inst
            .dependencies()
            .iter()
            .all(|dep| state.retired.get(dep).is_some_and(|&at| at < state.cycle)))
    }

    fn retire_cycle(&self, _inst: &Instruction, issue_cycle: u64) -> u64 {
        issue_cycle
    }
}
