//! Nios II instruction encoders.
//!
//! One constructor per instruction format. Register indices and immediates are
//! masked to their field widths; range checking is the assembler's job.

use crate::isa::instruction::{
    A_SHIFT, B_SHIFT, C_SHIFT, IMM5_MASK, IMM5_SHIFT, IMM16_MASK, IMM16_SHIFT, IMM26_MASK,
    IMM26_SHIFT, OP_MASK, OPX_MASK, OPX_SHIFT, REG_MASK,
};
use crate::isa::opcodes::R_TYPE;

/// Encodes an I-type instruction: `A | B | IMM16 | OP`.
pub const fn i_type(op: u32, a: usize, b: usize, imm16: u32) -> u32 {
    ((a as u32 & REG_MASK) << A_SHIFT)
        | ((b as u32 & REG_MASK) << B_SHIFT)
        | ((imm16 & IMM16_MASK) << IMM16_SHIFT)
        | (op & OP_MASK)
}

/// Encodes an R-type instruction: `A | B | C | OPX | IMM5 | 0x3A`.
pub const fn r_type(opx: u32, a: usize, b: usize, c: usize, imm5: u32) -> u32 {
    ((a as u32 & REG_MASK) << A_SHIFT)
        | ((b as u32 & REG_MASK) << B_SHIFT)
        | ((c as u32 & REG_MASK) << C_SHIFT)
        | ((opx & OPX_MASK) << OPX_SHIFT)
        | ((imm5 & IMM5_MASK) << IMM5_SHIFT)
        | R_TYPE
}

/// Encodes a J-type instruction: `IMM26 | OP`.
pub const fn j_type(op: u32, imm26: u32) -> u32 {
    ((imm26 & IMM26_MASK) << IMM26_SHIFT) | (op & OP_MASK)
}
