//! Simulation statistics collection and reporting.
//!
//! This module tracks scheduling metrics for a run. It provides:
//! 1. **Cycle and IPC:** Total cycles, issued and retired instructions, and derived throughput.
//! 2. **Issue behaviour:** Stall cycles, settle cycles, issue slot utilisation, and peak in-flight count.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;

/// Counters gathered by the scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Issue width the run used.
    pub issue_width: usize,
    /// Cycles simulated.
    pub cycles: u64,
    /// Instructions issued.
    pub instructions_issued: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Cycles in which instructions were pending but none issued.
    pub issue_stall_cycles: u64,
    /// Cycles whose issue phase was skipped after a retirement.
    pub settle_cycles: u64,
    /// Sum over cycles of instructions issued.
    pub issue_slots_used: u64,
    /// Largest number of instructions in flight at once.
    pub max_in_flight: usize,
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "issue"];

impl SimStats {
    /// Creates zeroed counters for a run of the given issue width.
    pub fn new(issue_width: usize) -> Self {
        Self {
            start_time: Instant::now(),
            issue_width,
            cycles: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            issue_stall_cycles: 0,
            settle_cycles: 0,
            issue_slots_used: 0,
            max_in_flight: 0,
        }
    }

    /// Retired instructions per cycle; `0.0` before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.instructions_retired as f64 / self.cycles as f64
    }

    /// Fraction of issue slots (`cycles * issue_width`) that were used.
    pub fn slot_utilisation(&self) -> f64 {
        let slots = self.cycles * self.issue_width as u64;
        if slots == 0 {
            return 0.0;
        }
        self.issue_slots_used as f64 / slots as f64
    }

    /// Renders the requested sections. An empty slice selects all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let mut out = String::new();

        if want("summary") {
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "ISSUE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "host_seconds             {:.4} s", self.start_time.elapsed().as_secs_f64());
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("issue") {
            let _ = writeln!(out, "ISSUE");
            let _ = writeln!(out, "  width                  {}", self.issue_width);
            let _ = writeln!(out, "  issued                 {}", self.instructions_issued);
            let _ = writeln!(
                out,
                "  slots.used             {} ({:.2}%)",
                self.issue_slots_used,
                self.slot_utilisation() * 100.0
            );
            let _ = writeln!(
                out,
                "  stalls.issue           {} ({:.2}%)",
                self.issue_stall_cycles,
                self.issue_stall_cycles as f64 / cyc * 100.0
            );
            let _ = writeln!(out, "  cycles.settle          {}", self.settle_cycles);
            let _ = writeln!(out, "  in_flight.max          {}", self.max_in_flight);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names from [`STATS_SECTIONS`], or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
