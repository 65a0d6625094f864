//! Instruction field extraction and insertion.
//!
//! Provides bit masks, shifts, and a trait for reading Nios II instruction
//! fields out of 32-bit instruction words.

/// Bit mask for the `OP` field (bits 5-0).
pub const OP_MASK: u32 = 0x3F;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the `OPX` field (bits 16-11).
pub const OPX_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate field.
pub const IMM16_MASK: u32 = 0xFFFF;
/// Bit mask for the 5-bit shift immediate.
pub const IMM5_MASK: u32 = 0x1F;
/// Bit mask for the 26-bit jump immediate.
pub const IMM26_MASK: u32 = 0x03FF_FFFF;

/// Shift of the `A` register field.
pub const A_SHIFT: u32 = 27;
/// Shift of the `B` register field.
pub const B_SHIFT: u32 = 22;
/// Shift of the `C` register field.
pub const C_SHIFT: u32 = 17;
/// Shift of the `OPX` field.
pub const OPX_SHIFT: u32 = 11;
/// Shift of the `IMM5` field.
pub const IMM5_SHIFT: u32 = 6;
/// Shift of the `IMM16` field.
pub const IMM16_SHIFT: u32 = 6;
/// Shift of the `IMM26` field.
pub const IMM26_SHIFT: u32 = 6;

/// Trait for extracting Nios II instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the primary opcode (bits 5-0).
    fn op(&self) -> u32;

    /// Extracts register field `A` (bits 31-27).
    fn a(&self) -> usize;

    /// Extracts register field `B` (bits 26-22).
    fn b(&self) -> usize;

    /// Extracts register field `C` (bits 21-17, R-type only).
    fn c(&self) -> usize;

    /// Extracts the extended opcode (bits 16-11, R-type only).
    fn opx(&self) -> u32;

    /// Extracts the 5-bit shift immediate (bits 10-6, R-type only).
    fn imm5(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 21-6, I-type).
    fn imm16(&self) -> u32;

    /// Extracts the 26-bit jump immediate (bits 31-6, J-type).
    fn imm26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn op(&self) -> u32 {
        self & OP_MASK
    }

    #[inline(always)]
    fn a(&self) -> usize {
        ((self >> A_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn b(&self) -> usize {
        ((self >> B_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn c(&self) -> usize {
        ((self >> C_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn opx(&self) -> u32 {
        (self >> OPX_SHIFT) & OPX_MASK
    }

    #[inline(always)]
    fn imm5(&self) -> u32 {
        (self >> IMM5_SHIFT) & IMM5_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        (self >> IMM16_SHIFT) & IMM16_MASK
    }

    #[inline(always)]
    fn imm26(&self) -> u32 {
        (self >> IMM26_SHIFT) & IMM26_MASK
    }
}

/// Decoded instruction with every field extracted.
///
/// Fields that do not belong to the instruction's format hold whatever bits the
/// word carries there; handlers only look at the fields of their own format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Primary opcode.
    pub op: u32,
    /// Extended opcode (R-type).
    pub opx: u32,
    /// Register field `A`.
    pub a: usize,
    /// Register field `B`.
    pub b: usize,
    /// Register field `C`.
    pub c: usize,
    /// Shift immediate (R-type).
    pub imm5: u32,
    /// Sign-extended 16-bit immediate.
    pub simm: i32,
    /// Zero-extended 16-bit immediate.
    pub uimm: u32,
    /// 26-bit jump immediate.
    pub imm26: u32,
}

impl Decoded {
    /// Address of the following instruction.
    pub const fn next_pc(&self) -> u32 {
        self.pc.wrapping_add(crate::common::WORD_SIZE)
    }
}
