//! Nios II primary opcodes (the `OP` field, bits 5-0).
//!
//! I-type and J-type instructions are identified by `OP` alone; every R-type
//! instruction shares [`R_TYPE`] and is identified by its `OPX` field.

/// J-type: call subroutine.
pub const CALL: u32 = 0x00;
/// J-type: jump immediate.
pub const JMPI: u32 = 0x01;
/// Load byte unsigned.
pub const LDBU: u32 = 0x03;
/// Add immediate.
pub const ADDI: u32 = 0x04;
/// Store byte.
pub const STB: u32 = 0x05;
/// Unconditional branch.
pub const BR: u32 = 0x06;
/// Load byte (sign-extended).
pub const LDB: u32 = 0x07;
/// Compare greater-or-equal signed immediate.
pub const CMPGEI: u32 = 0x08;
/// Load half-word unsigned.
pub const LDHU: u32 = 0x0B;
/// AND immediate.
pub const ANDI: u32 = 0x0C;
/// Store half-word.
pub const STH: u32 = 0x0D;
/// Branch if greater-or-equal signed.
pub const BGE: u32 = 0x0E;
/// Load half-word (sign-extended).
pub const LDH: u32 = 0x0F;
/// Compare less-than signed immediate.
pub const CMPLTI: u32 = 0x10;
/// OR immediate.
pub const ORI: u32 = 0x14;
/// Store word.
pub const STW: u32 = 0x15;
/// Branch if less-than signed.
pub const BLT: u32 = 0x16;
/// Load word.
pub const LDW: u32 = 0x17;
/// Compare not-equal immediate.
pub const CMPNEI: u32 = 0x18;
/// XOR immediate.
pub const XORI: u32 = 0x1C;
/// Branch if not equal.
pub const BNE: u32 = 0x1E;
/// Compare equal immediate.
pub const CMPEQI: u32 = 0x20;
/// Multiply immediate.
pub const MULI: u32 = 0x24;
/// Branch if equal.
pub const BEQ: u32 = 0x26;
/// Compare greater-or-equal unsigned immediate.
pub const CMPGEUI: u32 = 0x28;
/// AND high immediate.
pub const ANDHI: u32 = 0x2C;
/// Branch if greater-or-equal unsigned.
pub const BGEU: u32 = 0x2E;
/// Compare less-than unsigned immediate.
pub const CMPLTUI: u32 = 0x30;
/// OR high immediate.
pub const ORHI: u32 = 0x34;
/// Branch if less-than unsigned.
pub const BLTU: u32 = 0x36;
/// R-type escape; the operation is in `OPX`.
pub const R_TYPE: u32 = 0x3A;
/// XOR high immediate.
pub const XORHI: u32 = 0x3C;

/// R-type extended opcodes (the `OPX` field, bits 16-11).
pub mod opx {
    /// Rotate left immediate.
    pub const ROLI: u32 = 0x02;
    /// Rotate left.
    pub const ROL: u32 = 0x03;
    /// Return from subroutine.
    pub const RET: u32 = 0x05;
    /// Bitwise NOR.
    pub const NOR: u32 = 0x06;
    /// Compare greater-or-equal signed.
    pub const CMPGE: u32 = 0x08;
    /// Rotate right.
    pub const ROR: u32 = 0x0B;
    /// Computed jump.
    pub const JMP: u32 = 0x0D;
    /// Bitwise AND.
    pub const AND: u32 = 0x0E;
    /// Compare less-than signed.
    pub const CMPLT: u32 = 0x10;
    /// Shift left logical immediate.
    pub const SLLI: u32 = 0x12;
    /// Shift left logical.
    pub const SLL: u32 = 0x13;
    /// Bitwise OR.
    pub const OR: u32 = 0x16;
    /// Compare not-equal.
    pub const CMPNE: u32 = 0x18;
    /// Shift right logical immediate.
    pub const SRLI: u32 = 0x1A;
    /// Shift right logical.
    pub const SRL: u32 = 0x1B;
    /// Get address of the following instruction.
    pub const NEXTPC: u32 = 0x1C;
    /// Call subroutine in register.
    pub const CALLR: u32 = 0x1D;
    /// Bitwise XOR.
    pub const XOR: u32 = 0x1E;
    /// Compare equal.
    pub const CMPEQ: u32 = 0x20;
    /// Divide unsigned.
    pub const DIVU: u32 = 0x24;
    /// Divide signed.
    pub const DIV: u32 = 0x25;
    /// Multiply.
    pub const MUL: u32 = 0x27;
    /// Compare greater-or-equal unsigned.
    pub const CMPGEU: u32 = 0x28;
    /// Compare less-than unsigned.
    pub const CMPLTU: u32 = 0x30;
    /// Add.
    pub const ADD: u32 = 0x31;
    /// Subtract.
    pub const SUB: u32 = 0x39;
    /// Shift right arithmetic immediate.
    pub const SRAI: u32 = 0x3A;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x3B;
}
