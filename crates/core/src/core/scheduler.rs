//! Issue/Retire Scheduler.
//!
//! This module implements the cycle-stepping engine. It provides:
//! 1. **Retire Phase:** Retires every in-flight instruction whose retire cycle has arrived.
//! 2. **Issue Phase:** Issues pending instructions in program order, bounded by the issue width,
//!    the in-flight window, the hazard resolver, and the single-writer rule on destinations.
//! 3. **Event Stream:** Yields one [`CycleEvent`] per simulated cycle as a fused iterator.
//! 4. **Deadlock Detection:** Fails when a cycle makes no progress while work remains.
//!
//! The same engine runs both hazard models; the [`HazardResolver`] supplied at
//! construction decides readiness and completion.

use std::collections::BTreeMap;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::common::constants::FIRST_CYCLE;
use crate::common::error::{ConfigError, SimError};
use crate::core::event::CycleEvent;
use crate::core::hazards::{HazardResolver, SchedulerState};
use crate::core::resources::ResourceTable;
use crate::isa::instruction::{InstrId, Instruction};
use crate::stats::SimStats;

/// Order in which pending instructions are considered for issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueOrder {
    /// Stop the issue phase at the first instruction that cannot issue.
    InOrder,
    /// Skip instructions that cannot issue and keep scanning.
    FirstFit,
}

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Maximum instructions issued per cycle, and maximum in flight.
    pub issue_width: usize,
    /// Scan policy of the issue phase.
    pub issue_order: IssueOrder,
    /// Skip the issue phase in any cycle where something retired.
    pub settle_after_retire: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            issue_width: 1,
            issue_order: IssueOrder::InOrder,
            settle_after_retire: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    index: usize,
    retire_cycle: u64,
}

/// Cycle-stepping issue/retire engine.
///
/// Owns the program and the resource table for the duration of the run and
/// hands them back through [`Scheduler::into_parts`].
#[derive(Debug)]
pub struct Scheduler {
    program: Vec<Instruction>,
    resources: ResourceTable,
    resolver: Box<dyn HazardResolver>,
    options: SchedulerOptions,
    cycle: u64,
    pending: Vec<usize>,
    in_flight: Vec<InFlight>,
    retired: BTreeMap<InstrId, u64>,
    finished: bool,
    stats: SimStats,
}

impl Scheduler {
    /// Creates a scheduler positioned before cycle 1.
    ///
    /// # Arguments
    ///
    /// * `program` - Instructions with ids 1..N in program order.
    /// * `resources` - Resource table the program refers to.
    /// * `resolver` - Readiness and completion policy.
    /// * `options` - Issue width, order, and settle flag.
    ///
    /// # Errors
    ///
    /// `Config(ZeroIssueWidth)` for a zero width, `OutOfOrderId` when ids are
    /// not 1..N, and whatever the resolver's `validate` reports.
    pub fn new(
        program: Vec<Instruction>,
        resources: ResourceTable,
        resolver: Box<dyn HazardResolver>,
        options: SchedulerOptions,
    ) -> Result<Self, SimError> {
        if options.issue_width == 0 {
            return Err(ConfigError::ZeroIssueWidth.into());
        }
        for (index, inst) in program.iter().enumerate() {
            if inst.id() != InstrId::from_index(index) {
                return Err(SimError::OutOfOrderId {
                    position: index + 1,
                    found: inst.id(),
                });
            }
        }
        resolver.validate(&program)?;

        debug!(
            resolver = resolver.name(),
            width = options.issue_width,
            order = ?options.issue_order,
            settle = options.settle_after_retire,
            instructions = program.len(),
            "scheduler ready"
        );

        Ok(Self {
            pending: (0..program.len()).collect(),
            program,
            resources,
            resolver,
            options,
            cycle: FIRST_CYCLE,
            in_flight: Vec::new(),
            retired: BTreeMap::new(),
            finished: false,
            stats: SimStats::new(options.issue_width),
        })
    }

    /// Cycle the next call to [`Scheduler::step`] simulates.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The program, with issue cycles recorded so far.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Current resource reservations and values.
    pub const fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    /// Retire cycle of every retired instruction.
    pub const fn retired(&self) -> &BTreeMap<InstrId, u64> {
        &self.retired
    }

    /// Counters gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Engine parameters.
    pub const fn options(&self) -> SchedulerOptions {
        self.options
    }

    /// `true` once every instruction has retired.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty() && self.in_flight.is_empty()
    }

    /// Consumes the scheduler, returning the program, the resource table and the stats.
    pub fn into_parts(self) -> (Vec<Instruction>, ResourceTable, SimStats) {
        (self.program, self.resources, self.stats)
    }

    /// Simulates one cycle: retire, issue, then advance.
    ///
    /// # Errors
    ///
    /// `UnknownResource` when an instruction names a missing resource, and
    /// `SchedulingDeadlock` when the cycle made no progress although
    /// instructions are still pending.
    pub fn step(&mut self) -> Result<CycleEvent, SimError> {
        let cycle = self.cycle;
        let mut event = CycleEvent::new(cycle);
        let had_pending = !self.pending.is_empty();

        self.retire_phase(&mut event);

        if self.options.settle_after_retire && !event.retired.is_empty() {
            self.stats.settle_cycles += 1;
            trace!(cycle, "settling after retirement");
        } else {
            self.issue_phase(&mut event)?;
            if had_pending && event.issued.is_empty() {
                self.stats.issue_stall_cycles += 1;
            }
        }

        if event.is_idle() && self.in_flight.is_empty() && !self.pending.is_empty() {
            let blocked = self.program[self.pending[0]].id();
            warn!(cycle, blocked = %blocked, "no instruction can make progress");
            return Err(SimError::SchedulingDeadlock { cycle, blocked });
        }

        event.normalize();
        self.stats.cycles += 1;
        self.cycle += 1;
        Ok(event)
    }

    fn retire_phase(&mut self, event: &mut CycleEvent) {
        let cycle = self.cycle;
        let mut done = Vec::new();
        self.in_flight.retain(|entry| {
            if entry.retire_cycle <= cycle {
                done.push(entry.index);
                false
            } else {
                true
            }
        });
        for index in done {
            self.record_retirement(index, event);
        }
    }

    fn issue_phase(&mut self, event: &mut CycleEvent) -> Result<(), SimError> {
        let width = self.options.issue_width;
        let mut issued = 0;
        let mut position = 0;

        while position < self.pending.len() && issued < width && self.in_flight.len() < width {
            let index = self.pending[position];
            if self.can_issue(index, position)? {
                let _ = self.pending.remove(position);
                self.issue(index, event)?;
                issued += 1;
                continue;
            }
            trace!(cycle = self.cycle, id = %self.program[index].id(), "not ready");
            match self.options.issue_order {
                IssueOrder::InOrder => break,
                IssueOrder::FirstFit => position += 1,
            }
        }

        self.stats.issue_slots_used += issued as u64;
        Ok(())
    }

    fn can_issue(&self, index: usize, position: usize) -> Result<bool, SimError> {
        let inst = &self.program[index];
        let state = SchedulerState {
            cycle: self.cycle,
            resources: &self.resources,
            retired: &self.retired,
            program: &self.program,
            older_pending: &self.pending[..position],
        };
        for operand in inst.operands() {
            let _ = self.resources.busy_until(operand).map_err(|e| e.attach(inst.id()))?;
        }
        if !self.resolver.is_ready(inst, &state).map_err(|e| e.attach(inst.id()))? {
            return Ok(false);
        }
        // At most one in-flight writer per resource.
        match inst.destination() {
            Some(dest) => self
                .resources
                .is_free_at(dest, self.cycle)
                .map_err(|e| e.attach(inst.id())),
            None => Ok(true),
        }
    }

    fn issue(&mut self, index: usize, event: &mut CycleEvent) -> Result<(), SimError> {
        let cycle = self.cycle;
        let retire_cycle = self.resolver.retire_cycle(&self.program[index], cycle);

        let inst = &mut self.program[index];
        inst.mark_issued(cycle);
        let id = inst.id();
        if let Some(dest) = inst.destination() {
            self.resources
                .reserve(dest, retire_cycle)
                .map_err(|e| e.attach(id))?;
        }
        debug!(cycle, id = %id, retire_cycle, "issue");
        event.issued.push(id);
        self.stats.instructions_issued += 1;

        if retire_cycle <= cycle {
            self.record_retirement(index, event);
        } else {
            self.in_flight.push(InFlight { index, retire_cycle });
            self.stats.max_in_flight = self.stats.max_in_flight.max(self.in_flight.len());
        }
        Ok(())
    }

    fn record_retirement(&mut self, index: usize, event: &mut CycleEvent) {
        let id = self.program[index].id();
        let _ = self.retired.insert(id, self.cycle);
        event.retired.push(id);
        self.stats.instructions_retired += 1;
        debug!(cycle = self.cycle, id = %id, "retire");
    }
}

impl Iterator for Scheduler {
    type Item = Result<CycleEvent, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.is_complete() {
            self.finished = true;
            return None;
        }
        let result = self.step();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl FusedIterator for Scheduler {}
