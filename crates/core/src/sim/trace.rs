//! Trace Reporter.
//!
//! Renders a simulation trace for people and for tools. It provides:
//! 1. **Table:** A fixed-width cycle table whose issued column widens with the issue width.
//! 2. **JSON:** The events, per-instruction issue cycles, final registers, and stats.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::event::CycleEvent;
use crate::isa::instruction::{InstrId, Instruction};
use crate::sim::simulator::Trace;
use crate::stats::SimStats;

/// Width of the cycle column.
const CYCLE_COLUMN: usize = 10;

/// Width of the retired column.
const RETIRED_COLUMN: usize = 20;

/// Output format of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    /// Fixed-width text table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
}

/// Renders events against the program they came from.
#[derive(Debug, Clone, Copy)]
pub struct TraceReporter<'a> {
    program: &'a [Instruction],
    issue_width: usize,
}

impl<'a> TraceReporter<'a> {
    /// Creates a reporter for `program` simulated with `issue_width`.
    pub const fn new(program: &'a [Instruction], issue_width: usize) -> Self {
        Self { program, issue_width }
    }

    /// Width of the issued column: 30, 40, or 55 for widths 1, 2, and 3+.
    pub const fn issued_column(&self) -> usize {
        match self.issue_width {
            0 | 1 => 30,
            2 => 40,
            _ => 55,
        }
    }

    /// Length of the dashed rules: 60, 70, or 100 for widths 1, 2, and 3+.
    pub const fn rule_width(&self) -> usize {
        match self.issue_width {
            0 | 1 => 60,
            2 => 70,
            _ => 100,
        }
    }

    /// Renders the table, ending with `Execution completed.`.
    ///
    /// Issued instructions appear as `N. text`, retired ones as `Instruction N`.
    /// Trailing padding is trimmed from each row.
    pub fn render_table(&self, events: &[CycleEvent]) -> String {
        let rule = "-".repeat(self.rule_width());
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.row("Cycle", "Issued Instruction", "Retired Instruction"));
        let _ = writeln!(out, "{rule}");
        for event in events {
            let issued: Vec<String> = event.issued.iter().map(|&id| self.describe(id)).collect();
            let retired: Vec<String> = event.retired.iter().map(|id| format!("Instruction {id}")).collect();
            let _ = writeln!(
                out,
                "{}",
                self.row(&event.cycle.to_string(), &issued.join("  "), &retired.join(" "))
            );
        }
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Execution completed.");
        out
    }

    /// Renders the trace as pretty-printed JSON.
    pub fn render_json(&self, trace: &Trace) -> Result<String, serde_json::Error> {
        let report = JsonReport {
            cycles: trace.cycles(),
            events: &trace.events,
            instructions: self
                .program
                .iter()
                .map(|inst| JsonInstruction {
                    id: inst.id(),
                    text: format!("{inst:#}"),
                    issue_cycle: inst.issue_cycle(),
                })
                .collect(),
            registers: trace
                .registers
                .iter()
                .map(|(name, r)| JsonRegister { name, value: r.value })
                .collect(),
            stats: &trace.stats,
        };
        serde_json::to_string_pretty(&report)
    }

    fn describe(&self, id: InstrId) -> String {
        match self.program.get(id.index()) {
            Some(inst) => format!("{id}. {inst:#}"),
            None => format!("{id}."),
        }
    }

    fn row(&self, cycle: &str, issued: &str, retired: &str) -> String {
        let line = format!(
            "{cycle:<c$}{issued:<i$}{retired:<r$}",
            c = CYCLE_COLUMN,
            i = self.issued_column(),
            r = RETIRED_COLUMN,
        );
        line.trim_end().to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    cycles: u64,
    events: &'a [CycleEvent],
    instructions: Vec<JsonInstruction>,
    registers: Vec<JsonRegister<'a>>,
    stats: &'a SimStats,
}

#[derive(Serialize)]
struct JsonInstruction {
    id: InstrId,
    text: String,
    issue_cycle: Option<u64>,
}

#[derive(Serialize)]
struct JsonRegister<'a> {
    name: &'a str,
    value: i64,
}
