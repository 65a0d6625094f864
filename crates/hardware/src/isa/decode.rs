//! Nios II Instruction Decoder.
//!
//! Splits a 32-bit instruction word into the `Decoded` field set shared by all
//! three formats (I, R, J) and sign-extends the 16-bit immediate.

use crate::isa::instruction::{Decoded, InstructionBits};

/// Decodes an instruction word fetched from `pc`.
///
/// Decoding never fails: whether the opcode exists is decided by the dispatch
/// table, not here.
pub fn decode(raw: u32, pc: u32) -> Decoded {
    let uimm = raw.imm16();
    Decoded {
        raw,
        pc,
        op: raw.op(),
        opx: raw.opx(),
        a: raw.a(),
        b: raw.b(),
        c: raw.c(),
        imm5: raw.imm5(),
        simm: i32::from(uimm as u16 as i16),
        uimm,
        imm26: raw.imm26(),
    }
}
