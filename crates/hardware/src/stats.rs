//! Execution statistics collection and reporting.
//!
//! This module tracks what the core has retired since the last compile or reset. It provides:
//! 1. **Totals:** Retired instruction count.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch).
//! 3. **Reporting:** A plain-text summary for the command-line front end.

use serde::Serialize;

use crate::core::dispatch::InstClass;

/// Execution statistics for one program run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecStats {
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch, jump, call, and return instructions retired.
    pub inst_branch: u64,
    /// Count of ALU (arithmetic, logic, compare, shift) instructions retired.
    pub inst_alu: u64,
}

impl ExecStats {
    /// Records one retired instruction of the given class.
    pub fn record(&mut self, class: InstClass) {
        self.instructions_retired += 1;
        match class {
            InstClass::Alu => self.inst_alu += 1,
            InstClass::Load => self.inst_load += 1,
            InstClass::Store => self.inst_store += 1,
            InstClass::Branch => self.inst_branch += 1,
        }
    }

    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints the statistics summary to stdout.
    pub fn print(&self) {
        let total = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / total) * 100.0;

        println!("\n==========================================================");
        println!("NIOS II EXECUTION STATISTICS");
        println!("==========================================================");
        println!("sim_insts                {}", self.instructions_retired);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  op.alu                 {} ({:.2}%)", self.inst_alu, pct(self.inst_alu));
        println!("  op.load                {} ({:.2}%)", self.inst_load, pct(self.inst_load));
        println!("  op.store               {} ({:.2}%)", self.inst_store, pct(self.inst_store));
        println!("  op.branch              {} ({:.2}%)", self.inst_branch, pct(self.inst_branch));
        println!("==========================================================");
    }
}
