//! Simulation driver.
//!
//! This module ties configuration, program and scheduler together. It provides:
//! 1. **Construction:** Builds the resource table and hazard resolver from a [`Config`].
//! 2. **Stepping:** A `tick` that advances one cycle and yields its event.
//! 3. **Completion:** A `run` that drains the event stream, then executes the
//!    program against the register file and collects the result.

use tracing::{debug, info};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::event::CycleEvent;
use crate::core::hazards::{HazardMode, derive_dependencies};
use crate::core::resources::ResourceTable;
use crate::core::scheduler::Scheduler;
use crate::isa::instruction::Instruction;
use crate::isa::parse::parse_program;
use crate::stats::SimStats;

/// Result of a completed simulation.
#[derive(Debug)]
pub struct Trace {
    /// One event per simulated cycle.
    pub events: Vec<CycleEvent>,
    /// The program with every issue cycle recorded.
    pub program: Vec<Instruction>,
    /// Register values after executing the program.
    pub registers: ResourceTable,
    /// Counters gathered during the run.
    pub stats: SimStats,
}

impl Trace {
    /// Number of cycles simulated.
    pub fn cycles(&self) -> u64 {
        self.events.last().map_or(0, |e| e.cycle)
    }
}

/// Top-level simulator.
///
/// Owns the scheduler for one program. Step it with [`Simulator::tick`] or
/// iterate it directly; [`Simulator::run`] does both and finishes the run.
#[derive(Debug)]
pub struct Simulator {
    scheduler: Scheduler,
    trace_cycles: bool,
}

impl Simulator {
    /// Creates a simulator for `program` under `config`.
    ///
    /// In explicit mode, when `derive_dependencies` is set and no instruction
    /// declares dependencies, the dependency lists are derived from register
    /// hazards first.
    ///
    /// # Errors
    ///
    /// Configuration errors, `UnknownResource` for initial values naming
    /// missing registers, and any program validation error of the scheduler.
    pub fn new(config: &Config, mut program: Vec<Instruction>) -> Result<Self, SimError> {
        config.validate()?;

        let sched = &config.scheduler;
        if sched.mode == HazardMode::Explicit
            && sched.derive_dependencies
            && program.iter().all(|inst| inst.dependencies().is_empty())
        {
            derive_dependencies(&mut program);
            debug!("derived dependencies from register hazards");
        }

        let resources = config.registers.build_table()?;
        let scheduler = Scheduler::new(program, resources, sched.mode.resolver(), sched.options())?;

        Ok(Self {
            scheduler,
            trace_cycles: config.general.trace_cycles,
        })
    }

    /// Parses `source` with the configured latencies and creates a simulator for it.
    ///
    /// # Errors
    ///
    /// `MalformedInstruction` for the first bad line, then as [`Simulator::new`].
    pub fn from_source(config: &Config, source: &str) -> Result<Self, SimError> {
        let program = parse_program(source, &config.latency)?;
        Self::new(config, program)
    }

    /// The underlying scheduler.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Advances one cycle. Returns `None` once every instruction has retired.
    pub fn tick(&mut self) -> Option<Result<CycleEvent, SimError>> {
        let next = self.scheduler.next();
        if self.trace_cycles {
            if let Some(Ok(event)) = &next {
                debug!("{event}");
            }
        }
        next
    }

    /// Runs to completion and executes the program in program order.
    ///
    /// # Errors
    ///
    /// The first error raised by the scheduler or by register execution.
    pub fn run(mut self) -> Result<Trace, SimError> {
        info!(
            instructions = self.scheduler.program().len(),
            width = self.scheduler.options().issue_width,
            "simulation start"
        );

        let mut events = Vec::new();
        while let Some(event) = self.tick() {
            events.push(event?);
        }

        let (program, mut registers, stats) = self.scheduler.into_parts();
        for inst in &program {
            let _ = registers.execute(inst)?;
        }

        info!(cycles = stats.cycles, ipc = stats.ipc(), "simulation complete");
        Ok(Trace {
            events,
            program,
            registers,
            stats,
        })
    }
}

impl Iterator for Simulator {
    type Item = Result<CycleEvent, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick()
    }
}
