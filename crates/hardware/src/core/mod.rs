//! Core processor implementation.
//!
//! This module contains the CPU state, the architectural register file, the
//! immutable instruction dispatch table, and the functional units the table's
//! behaviours are built from.

/// Architecture-specific components (register file and access tags).
pub mod arch;

/// CPU state and the fetch-decode-execute step.
pub mod cpu;

/// Opcode to behaviour table.
pub mod dispatch;

/// Functional units (ALU, branch unit, load/store unit).
pub mod units;

pub use self::cpu::Cpu;
