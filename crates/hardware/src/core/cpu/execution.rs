//! Main Execution Step.
//!
//! This module implements one fetch-decode-execute cycle. It performs the following:
//! 1. **Tag Reset:** Clears register access tags so viewers see only this step's accesses.
//! 2. **Fetch:** Reads the word at the PC; the all-zero word halts without retiring.
//! 3. **Dispatch:** Decodes the word and runs its table entry, which may redirect the PC.
//! 4. **Observability:** Counts the retired instruction and optionally traces it.

use tracing::trace;

use super::Cpu;
use crate::common::constants::HALT_SENTINEL;
use crate::common::error::EmulatorFault;
use crate::core::dispatch::DISPATCH;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;

impl Cpu {
    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if an instruction retired, `Ok(false)` if the word at the PC
    /// is the halt sentinel (the PC is unchanged).
    ///
    /// # Errors
    ///
    /// Returns an [`EmulatorFault`] if the fetch fails, the opcode is not
    /// supported, or the instruction faults. Registers and memory are left as
    /// they were before the step; only access tags may differ.
    pub fn step(&mut self) -> Result<bool, EmulatorFault> {
        self.regs.reset_access_tags();

        let pc = self.pc;
        let word = self
            .memory
            .read_word(pc)
            .map_err(|e| EmulatorFault::from_memory(pc, e))?;
        if word == HALT_SENTINEL {
            return Ok(false);
        }

        let decoded = decode(word, pc);
        let entry = DISPATCH
            .lookup(&decoded)
            .ok_or(EmulatorFault::InvalidOpcode { pc, word })?;
        let target = entry.exec.run(&mut self.regs, &mut self.memory, &decoded)?;

        self.pc = target.unwrap_or_else(|| decoded.next_pc());
        self.stats.record(entry.class);

        if self.trace {
            trace!(
                pc = format_args!("{pc:#010x}"),
                word = format_args!("{word:#010x}"),
                "{}",
                disassemble(word)
            );
        }
        Ok(true)
    }
}
