//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the Nios II subset understood by both the assembler and the core:
//! opcode tables, field layouts, encoders, the decoder, and a disassembler.
//!
//! # Formats
//!
//! * I-type: `A | B | IMM16 | OP` (arithmetic with immediate, loads, stores, branches).
//! * R-type: `A | B | C | OPX | IMM5 | 0x3A` (register-register operations).
//! * J-type: `IMM26 | OP` (`call`, `jmpi`).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding into a shared field set.
pub mod decode;

/// Instruction disassembler for listings and traces.
pub mod disasm;

/// Instruction encoders for the three formats.
pub mod encode;

/// Instruction field layout and bit extraction utilities.
pub mod instruction;

/// Primary and extended opcode constants.
pub mod opcodes;
