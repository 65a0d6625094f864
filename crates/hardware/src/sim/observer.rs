//! Emulator Observers.
//!
//! Hosts (viewers, consoles, test harnesses) register an [`EmulatorObserver`]
//! to be told about compiles, retired steps, faults, and resets. Observers get
//! read-only access; every method defaults to a no-op.

use crate::common::error::{CompileError, EmulatorFault};
use crate::core::arch::RegisterFile;
use crate::sim::program::Program;
use crate::soc::memory::Memory;

/// State-change notifications from an [`Emulator`](crate::sim::emulator::Emulator).
pub trait EmulatorObserver {
    /// A compile succeeded and `program` is now loaded.
    fn on_compiled(&mut self, _program: &Program) {}

    /// A compile was rejected; the previous program is still loaded.
    fn on_compile_failed(&mut self, _error: &CompileError) {}

    /// An instruction retired; `pc` is the address of the next instruction.
    fn on_step(&mut self, _pc: u32, _regs: &RegisterFile, _memory: &Memory) {}

    /// The run stopped on a fault.
    fn on_fault(&mut self, _fault: &EmulatorFault) {}

    /// The machine was reset to the program's initial state.
    fn on_reset(&mut self) {}
}
