//! Global Emulator Constants.
//!
//! This module defines machine-wide constants used across the emulator. It includes:
//! 1. **Word Constants:** Instruction and data word sizes and alignment masks.
//! 2. **Register Constants:** Register file dimensions.
//! 3. **Layout Constants:** The halt sentinel and padding words placed by the linker.

/// Size of one instruction word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Size of one half-word in bytes.
pub const HALF_SIZE: u32 = 2;

/// Mask of the low bits that must be clear for a word-aligned address.
pub const WORD_ALIGN_MASK: u32 = WORD_SIZE - 1;

/// Number of general-purpose registers in the Nios II register file.
pub const REGISTER_COUNT: usize = 32;

/// The all-zero instruction word that stops execution when fetched.
pub const HALT_SENTINEL: u32 = 0;

/// Encoding of `add r0, r0, r0`, used to pad `.align` in the text section.
pub const NOP_INSTRUCTION: u32 = 0x0001_883A;

/// Mask of the PC bits preserved by `call` and `jmpi` (the 256 MiB region).
pub const JUMP_REGION_MASK: u32 = 0xF000_0000;
