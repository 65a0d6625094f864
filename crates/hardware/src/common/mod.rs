//! Common utilities and types used throughout the emulator.
//!
//! This module provides building blocks shared by the assembler, linker and core:
//! 1. **Constants:** Word sizes, register counts, and layout sentinels.
//! 2. **Error Handling:** Compile errors and runtime faults.

/// Common constants used throughout the emulator.
pub mod constants;

/// Compile error and emulator fault definitions.
pub mod error;

pub use constants::{HALT_SENTINEL, REGISTER_COUNT, WORD_SIZE};
pub use error::{CompileError, CompileErrorKind, EmulatorFault};
