//! Nios II teaching emulator library.
//!
//! This crate implements a Nios II subset emulator with the following:
//! 1. **Assembler:** Two-pass assembler with labels, directives, expressions, and pseudo-instructions.
//! 2. **Linker:** Code and data layout with a reserved halt word and an entry label.
//! 3. **Core:** Fetch-decode-execute over a register file with per-register access tags.
//! 4. **Memory:** Flat, bounds-checked, little-endian byte-addressable memory.
//! 5. **Session:** An [`Emulator`] context with compile, step, run, reset, and observers.
//!
//! # Examples
//!
//! ```
//! use niosim_core::{Config, Emulator};
//!
//! let mut emu = Emulator::new(Config::default()).unwrap();
//! let _ = emu.compile("movi r2, 5\nadd r3, r2, r2\n").unwrap();
//! let _ = emu.run().unwrap();
//! assert_eq!(emu.registers().peek(3), 10);
//! assert_eq!(emu.read_pc(), 8);
//! ```

/// Two-pass assembler (source, expressions, operands, mnemonics, passes, symbols).
pub mod asm;
/// Common constants and error taxonomies.
pub mod common;
/// Emulator configuration (defaults and JSON loading).
pub mod config;
/// CPU core (register file, dispatch table, functional units, execution step).
pub mod core;
/// Instruction set (fields, decode, encode, disassembly, ABI names).
pub mod isa;
/// Linker, program image, emulator session, and observers.
pub mod sim;
/// System memory.
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// CPU state; owned by the emulator.
pub use crate::core::Cpu;
/// Session context; the main entry point for hosts.
pub use crate::sim::Emulator;
/// Immutable linked program.
pub use crate::sim::Program;
