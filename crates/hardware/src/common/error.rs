//! Compile Errors and Emulator Faults.
//!
//! This module defines the two fatal error taxonomies of the emulator. It provides:
//! 1. **Compile Errors:** Line-numbered diagnostics raised by the assembler and linker.
//! 2. **Emulator Faults:** Runtime conditions that abort the current run.
//! 3. **Memory Mapping:** Conversion from raw memory access errors into faults.
//!
//! Neither taxonomy is retried; both are surfaced verbatim to the caller.

use thiserror::Error;

use crate::soc::memory::MemoryError;

/// The reason a compilation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// The mnemonic is not part of the supported instruction set.
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    /// A label was defined more than once.
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    /// A symbol was referenced but never defined.
    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),

    /// An operand could not be parsed or has the wrong kind.
    #[error("malformed operand: {0}")]
    MalformedOperand(String),

    /// A directive is unknown or its arguments are invalid.
    #[error("malformed directive: {0}")]
    MalformedDirective(String),

    /// An immediate value does not fit its instruction field.
    #[error("immediate {value} out of range [{min}, {max}]")]
    ImmediateOutOfRange {
        /// The evaluated immediate.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// An instruction or directive appears in a section that cannot hold it.
    #[error("{0}")]
    WrongSection(String),

    /// The linked image does not fit the configured memory layout.
    #[error("layout error: {0}")]
    Layout(String),
}

/// A fatal assembler or linker diagnostic tied to a 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct CompileError {
    /// 1-based source line the error refers to.
    pub line: usize,
    /// What went wrong.
    pub kind: CompileErrorKind,
}

impl CompileError {
    /// Creates a compile error for the given source line.
    pub const fn new(line: usize, kind: CompileErrorKind) -> Self {
        Self { line, kind }
    }

    /// Returns the human-readable message without the line prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// A runtime condition that aborts the current run.
///
/// Register file and memory are left exactly as they were after the last
/// completed step; handlers validate before they mutate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmulatorFault {
    /// The fetched word has no entry in the dispatch table.
    #[error("invalid opcode {word:#010x} at pc {pc:#010x}")]
    InvalidOpcode {
        /// Address of the offending word.
        pc: u32,
        /// The raw instruction word.
        word: u32,
    },

    /// The PC would become a non-multiple of 4.
    #[error("misaligned pc {address:#010x}")]
    MisalignedPc {
        /// The rejected PC value.
        address: u32,
    },

    /// A memory access fell outside the allocated memory.
    #[error("out-of-bounds access at {address:#010x} (pc {pc:#010x})")]
    OutOfBounds {
        /// PC of the instruction performing the access.
        pc: u32,
        /// The first address of the access.
        address: u32,
    },

    /// A half-word or word access used an unaligned address.
    #[error("misaligned access at {address:#010x} (pc {pc:#010x})")]
    MisalignedAccess {
        /// PC of the instruction performing the access.
        pc: u32,
        /// The unaligned address.
        address: u32,
    },

    /// `div` or `divu` with a zero divisor.
    #[error("division by zero at pc {pc:#010x}")]
    DivisionByZero {
        /// PC of the dividing instruction.
        pc: u32,
    },

    /// Step or run requested with no runnable program.
    #[error("no runnable program; compile a program first")]
    NotRunnable,
}

impl EmulatorFault {
    /// Maps a memory error raised by the instruction at `pc` into a fault.
    pub const fn from_memory(pc: u32, err: MemoryError) -> Self {
        match err {
            MemoryError::OutOfBounds { address } => Self::OutOfBounds { pc, address },
            MemoryError::Misaligned { address } => Self::MisalignedAccess { pc, address },
        }
    }
}
