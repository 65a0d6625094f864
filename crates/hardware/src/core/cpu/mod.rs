//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire processor state:
//! 1. **State Management:** Register file with access tags and the program counter.
//! 2. **Memory:** The flat byte-addressable memory the program was loaded into.
//! 3. **Statistics:** Retired instruction counts by category.

/// Fetch-decode-execute step.
pub mod execution;

use crate::common::constants::WORD_ALIGN_MASK;
use crate::common::error::EmulatorFault;
use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::sim::program::Program;
use crate::soc::memory::{Memory, MemoryError};
use crate::stats::ExecStats;

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program Counter; always a multiple of 4.
    pub pc: u32,
    /// Main memory.
    pub memory: Memory,
    /// Execution statistics.
    pub stats: ExecStats,
    /// Emit a `trace!` event per retired instruction.
    pub trace: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed memory and the PC at the configured program origin.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::nios2(),
            pc: config.memory.program_start,
            memory: Memory::new(config.memory.size),
            stats: ExecStats::default(),
            trace: config.general.trace_instructions,
        }
    }

    /// Creates a CPU with the program loaded and the PC at its start address.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the program does not fit the
    /// configured memory size.
    pub fn with_program(program: &Program, config: &Config) -> Result<Self, MemoryError> {
        Ok(Self {
            memory: Memory::with_program(config.memory.size, program)?,
            pc: program.start_address,
            ..Self::new(config)
        })
    }

    /// Restores the power-on state: zeroed registers and tags, fresh
    /// statistics, `image` as memory, and the PC at `start`.
    pub fn reset(&mut self, image: &Memory, start: u32) {
        self.regs.reset();
        self.memory.clone_from(image);
        self.pc = start;
        self.stats.reset();
    }

    /// Overwrites the PC.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorFault::MisalignedPc`] if `value` is not a multiple of
    /// 4; the PC is left unchanged.
    pub fn write_pc(&mut self, value: u32) -> Result<(), EmulatorFault> {
        if value & WORD_ALIGN_MASK != 0 {
            return Err(EmulatorFault::MisalignedPc { address: value });
        }
        self.pc = value;
        Ok(())
    }

    /// Prints the PC and every register to stdout.
    pub fn dump_state(&self) {
        println!("pc   = {:#010x}", self.pc);
        self.regs.dump();
    }
}
