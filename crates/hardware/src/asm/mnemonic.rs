//! Mnemonic Table and Instruction Encoding.
//!
//! Maps every accepted mnemonic (real instructions and pseudo-instructions)
//! to an operand [`Form`], and encodes a form with its operands into one or
//! two instruction words. Sizes are fixed per form, so pass 1 can lay out the
//! text section before any operand is evaluated.

use super::operand::{self, ImmRange};
use crate::common::constants::{HALT_SENTINEL, JUMP_REGION_MASK, WORD_ALIGN_MASK, WORD_SIZE};
use crate::common::error::CompileErrorKind;
use crate::isa::abi::{REG_RA, REG_ZERO};
use crate::isa::encode::{i_type, j_type, r_type};
use crate::isa::instruction::IMM26_MASK;
use crate::isa::opcodes::{self as op, opx};

/// Operand shape and encoding recipe of a mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    /// `rC, rA, rB`.
    Reg3(u32),
    /// `rC, rA, rB` encoded as `rC, rB, rA` (`cmpgt` and friends).
    Reg3Swapped(u32),
    /// `rC, rA, imm5`.
    ShiftImm(u32),
    /// `rB, rA, imm16`.
    Imm(u32, ImmRange),
    /// `rB, offset(rA)`.
    Mem(u32),
    /// `rA, rB, label`.
    Branch(u32),
    /// `rA, rB, label` encoded as `rB, rA, label` (`bgt` and friends).
    BranchSwapped(u32),
    /// `label`.
    Br,
    /// `label`, absolute (`call`, `jmpi`).
    Jump(u32),
    /// `rA` (`jmp`, `callr`).
    JumpReg(u32),
    /// No operands; jumps to `ra`.
    Ret,
    /// `rC`.
    NextPc,
    /// No operands.
    Nop,
    /// `rC, rA`.
    Mov,
    /// `rB, imm16` signed.
    Movi,
    /// `rB, imm16` unsigned.
    Movui,
    /// `rB, imm16` into the upper half.
    Movhi,
    /// `rB, expr` full 32-bit value, two words.
    Movia,
    /// `rB, rA, imm16`, encoded as `addi` with the negated immediate.
    Subi,
}

/// Looks up a lower-case mnemonic.
pub fn lookup(mnemonic: &str) -> Option<Form> {
    use ImmRange::{Signed16 as S, Unsigned16 as U};
    let form = match mnemonic {
        "add" => Form::Reg3(opx::ADD),
        "sub" => Form::Reg3(opx::SUB),
        "mul" => Form::Reg3(opx::MUL),
        "div" => Form::Reg3(opx::DIV),
        "divu" => Form::Reg3(opx::DIVU),
        "and" => Form::Reg3(opx::AND),
        "or" => Form::Reg3(opx::OR),
        "xor" => Form::Reg3(opx::XOR),
        "nor" => Form::Reg3(opx::NOR),
        "sll" => Form::Reg3(opx::SLL),
        "srl" => Form::Reg3(opx::SRL),
        "sra" => Form::Reg3(opx::SRA),
        "rol" => Form::Reg3(opx::ROL),
        "ror" => Form::Reg3(opx::ROR),
        "cmpeq" => Form::Reg3(opx::CMPEQ),
        "cmpne" => Form::Reg3(opx::CMPNE),
        "cmplt" => Form::Reg3(opx::CMPLT),
        "cmpge" => Form::Reg3(opx::CMPGE),
        "cmpltu" => Form::Reg3(opx::CMPLTU),
        "cmpgeu" => Form::Reg3(opx::CMPGEU),
        "cmpgt" => Form::Reg3Swapped(opx::CMPLT),
        "cmple" => Form::Reg3Swapped(opx::CMPGE),
        "cmpgtu" => Form::Reg3Swapped(opx::CMPLTU),
        "cmpleu" => Form::Reg3Swapped(opx::CMPGEU),
        "slli" => Form::ShiftImm(opx::SLLI),
        "srli" => Form::ShiftImm(opx::SRLI),
        "srai" => Form::ShiftImm(opx::SRAI),
        "roli" => Form::ShiftImm(opx::ROLI),
        "addi" => Form::Imm(op::ADDI, S),
        "muli" => Form::Imm(op::MULI, S),
        "andi" => Form::Imm(op::ANDI, U),
        "ori" => Form::Imm(op::ORI, U),
        "xori" => Form::Imm(op::XORI, U),
        "andhi" => Form::Imm(op::ANDHI, U),
        "orhi" => Form::Imm(op::ORHI, U),
        "xorhi" => Form::Imm(op::XORHI, U),
        "cmpeqi" => Form::Imm(op::CMPEQI, S),
        "cmpnei" => Form::Imm(op::CMPNEI, S),
        "cmplti" => Form::Imm(op::CMPLTI, S),
        "cmpgei" => Form::Imm(op::CMPGEI, S),
        "cmpltui" => Form::Imm(op::CMPLTUI, U),
        "cmpgeui" => Form::Imm(op::CMPGEUI, U),
        "ldw" => Form::Mem(op::LDW),
        "ldh" => Form::Mem(op::LDH),
        "ldhu" => Form::Mem(op::LDHU),
        "ldb" => Form::Mem(op::LDB),
        "ldbu" => Form::Mem(op::LDBU),
        "stw" => Form::Mem(op::STW),
        "sth" => Form::Mem(op::STH),
        "stb" => Form::Mem(op::STB),
        "beq" => Form::Branch(op::BEQ),
        "bne" => Form::Branch(op::BNE),
        "blt" => Form::Branch(op::BLT),
        "bge" => Form::Branch(op::BGE),
        "bltu" => Form::Branch(op::BLTU),
        "bgeu" => Form::Branch(op::BGEU),
        "bgt" => Form::BranchSwapped(op::BLT),
        "ble" => Form::BranchSwapped(op::BGE),
        "bgtu" => Form::BranchSwapped(op::BLTU),
        "bleu" => Form::BranchSwapped(op::BGEU),
        "br" => Form::Br,
        "call" => Form::Jump(op::CALL),
        "jmpi" => Form::Jump(op::JMPI),
        "jmp" => Form::JumpReg(opx::JMP),
        "callr" => Form::JumpReg(opx::CALLR),
        "ret" => Form::Ret,
        "nextpc" => Form::NextPc,
        "nop" => Form::Nop,
        "mov" => Form::Mov,
        "movi" => Form::Movi,
        "movui" => Form::Movui,
        "movhi" => Form::Movhi,
        "movia" => Form::Movia,
        "subi" => Form::Subi,
        _ => return None,
    };
    Some(form)
}

impl Form {
    /// Encoded size in bytes.
    pub const fn size(self) -> u32 {
        match self {
            Self::Movia => 2 * WORD_SIZE,
            _ => WORD_SIZE,
        }
    }

    /// Number of operands the form expects.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Ret | Self::Nop => 0,
            Self::Br | Self::Jump(_) | Self::JumpReg(_) | Self::NextPc => 1,
            Self::Mem(_) | Self::Mov | Self::Movi | Self::Movui | Self::Movhi | Self::Movia => 2,
            Self::Reg3(_)
            | Self::Reg3Swapped(_)
            | Self::ShiftImm(_)
            | Self::Imm(..)
            | Self::Branch(_)
            | Self::BranchSwapped(_)
            | Self::Subi => 3,
        }
    }
}

/// Encodes one instruction.
///
/// # Arguments
///
/// * `mnemonic` - Mnemonic text, for diagnostics.
/// * `form`     - The operand form from [`lookup`].
/// * `operands` - Operand texts, already split at top-level commas.
/// * `pc`       - Absolute address of the first word.
/// * `symbols`  - Resolves symbol names to final values.
///
/// # Returns
///
/// `form.size() / 4` instruction words.
///
/// # Errors
///
/// Returns a [`CompileErrorKind`] for a wrong operand count, malformed
/// operands, undefined symbols, or out-of-range immediates and targets.
pub fn encode<F>(
    mnemonic: &str,
    form: Form,
    operands: &[&str],
    pc: u32,
    symbols: &F,
) -> Result<Vec<u32>, CompileErrorKind>
where
    F: Fn(&str) -> Option<i64>,
{
    if operands.len() != form.operand_count() {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "`{mnemonic}` expects {} operand(s), found {}",
            form.operand_count(),
            operands.len()
        )));
    }
    if let Some(empty) = operands.iter().position(|o| o.is_empty()) {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "operand {} of `{mnemonic}` is empty",
            empty + 1
        )));
    }
    let reg = |idx: usize| operand::register(operands[idx]);
    let imm = |idx: usize, range: ImmRange| {
        operand::immediate(operands[idx], range, symbols).map(|v| (v as u32) & 0xFFFF)
    };

    let word = match form {
        Form::Reg3(code) => r_type(code, reg(1)?, reg(2)?, reg(0)?, 0),
        Form::Reg3Swapped(code) => r_type(code, reg(2)?, reg(1)?, reg(0)?, 0),
        Form::ShiftImm(code) => {
            let shamt = operand::immediate(operands[2], ImmRange::Shift5, symbols)? as u32;
            r_type(code, reg(1)?, REG_ZERO, reg(0)?, shamt)
        }
        Form::Imm(code, range) => i_type(code, reg(1)?, reg(0)?, imm(2, range)?),
        Form::Mem(code) => {
            let (offset, base) = operand::memory(operands[1])?;
            let offset = operand::checked_value(&offset, ImmRange::Signed16, symbols)?;
            i_type(code, base, reg(0)?, (offset as u32) & 0xFFFF)
        }
        Form::Branch(code) => {
            let offset = branch_offset(operands[2], pc, symbols)?;
            i_type(code, reg(0)?, reg(1)?, offset)
        }
        Form::BranchSwapped(code) => {
            let offset = branch_offset(operands[2], pc, symbols)?;
            i_type(code, reg(1)?, reg(0)?, offset)
        }
        Form::Br => i_type(op::BR, REG_ZERO, REG_ZERO, branch_offset(operands[0], pc, symbols)?),
        Form::Jump(code) => jump(mnemonic, code, operands[0], pc, symbols)?,
        Form::JumpReg(code) => {
            let link = if code == opx::CALLR { REG_RA } else { REG_ZERO };
            r_type(code, reg(0)?, REG_ZERO, link, 0)
        }
        Form::Ret => r_type(opx::RET, REG_RA, REG_ZERO, REG_ZERO, 0),
        Form::NextPc => r_type(opx::NEXTPC, REG_ZERO, REG_ZERO, reg(0)?, 0),
        Form::Nop => r_type(opx::ADD, REG_ZERO, REG_ZERO, REG_ZERO, 0),
        Form::Mov => r_type(opx::ADD, reg(1)?, REG_ZERO, reg(0)?, 0),
        Form::Movi => i_type(op::ADDI, REG_ZERO, reg(0)?, imm(1, ImmRange::Signed16)?),
        Form::Movui => i_type(op::ORI, REG_ZERO, reg(0)?, imm(1, ImmRange::Unsigned16)?),
        Form::Movhi => i_type(op::ORHI, REG_ZERO, reg(0)?, imm(1, ImmRange::Unsigned16)?),
        Form::Subi => {
            let value = operand::immediate(operands[2], ImmRange::Word, symbols)?;
            let negated = ImmRange::Signed16.check(-value)?;
            i_type(op::ADDI, reg(1)?, reg(0)?, (negated as u32) & 0xFFFF)
        }
        Form::Movia => {
            let rb = reg(0)?;
            let value = operand::immediate(operands[1], ImmRange::Word, symbols)? as u32;
            let hi = super::expr::RelocOp::HiAdj.apply(value);
            let lo = super::expr::RelocOp::Lo.apply(value);
            return Ok(vec![
                i_type(op::ORHI, REG_ZERO, rb, hi),
                i_type(op::ADDI, rb, rb, lo),
            ]);
        }
    };
    Ok(vec![word])
}

/// Computes the encoded offset of a branch at `pc` to the target expression.
fn branch_offset<F>(text: &str, pc: u32, symbols: &F) -> Result<u32, CompileErrorKind>
where
    F: Fn(&str) -> Option<i64>,
{
    let target = operand::immediate(text, ImmRange::Word, symbols)? as u32;
    if target & WORD_ALIGN_MASK != 0 {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "branch target {target:#x} is not word-aligned"
        )));
    }
    let offset = i64::from(target) - (i64::from(pc) + i64::from(WORD_SIZE));
    let offset = ImmRange::Signed16.check(offset)?;
    Ok((offset as u32) & 0xFFFF)
}

/// Encodes `call` or `jmpi` at `pc` to an absolute target.
fn jump<F>(mnemonic: &str, code: u32, text: &str, pc: u32, symbols: &F) -> Result<u32, CompileErrorKind>
where
    F: Fn(&str) -> Option<i64>,
{
    let target = operand::immediate(text, ImmRange::Word, symbols)? as u32;
    if target & WORD_ALIGN_MASK != 0 {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "jump target {target:#x} is not word-aligned"
        )));
    }
    if target & JUMP_REGION_MASK != pc & JUMP_REGION_MASK {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "jump target {target:#x} is outside the 256 MiB region of {pc:#x}"
        )));
    }
    let word = j_type(code, (target >> 2) & IMM26_MASK);
    if word == HALT_SENTINEL {
        return Err(CompileErrorKind::MalformedOperand(format!(
            "`{mnemonic} {text}` encodes as the halt word"
        )));
    }
    Ok(word)
}
