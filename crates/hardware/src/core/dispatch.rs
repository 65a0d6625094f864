//! Instruction Dispatch Table.
//!
//! Maps opcodes to their behaviour. It provides:
//! 1. **Lookup:** `OP` selects an I/J-type entry; `OPX` selects an R-type entry when `OP == 0x3A`.
//! 2. **Behaviour:** Each entry names an [`Exec`] variant executed over the register file and memory.
//! 3. **Classification:** Each entry carries an [`InstClass`] for execution statistics.
//!
//! The table is built once, is never mutated, and is shared by every core.
//! Every behaviour validates its inputs (divisor, access, jump target) before it
//! mutates the register file or memory, so a faulting instruction leaves no trace.

use std::sync::LazyLock;

use crate::common::constants::WORD_ALIGN_MASK;
use crate::common::error::EmulatorFault;
use crate::core::arch::gpr::RegisterFile;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru::{BranchCond, Bru};
use crate::core::units::lsu::{Lsu, MemWidth};
use crate::isa::abi::REG_RA;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::{self as op, opx};
use crate::soc::memory::Memory;

/// Number of slots in each table (6-bit opcode fields).
const TABLE_SIZE: usize = 64;

/// Broad category of an instruction, used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstClass {
    /// Arithmetic, logic, compare, and shift operations.
    Alu,
    /// Memory loads.
    Load,
    /// Memory stores.
    Store,
    /// Branches, jumps, calls, and returns.
    Branch,
}

/// How an I-type instruction widens its 16-bit immediate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmKind {
    /// Sign-extended.
    Signed,
    /// Zero-extended.
    Unsigned,
    /// Shifted into the upper half-word.
    High,
}

/// Behaviour of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exec {
    /// `rC <- rA op rB`.
    AluReg(AluOp),
    /// `rC <- rA op IMM5`.
    AluShiftImm(AluOp),
    /// `rB <- rA op imm`.
    AluImm(AluOp, ImmKind),
    /// `rB <- mem[rA + simm]`, optionally sign-extended.
    Load(MemWidth, bool),
    /// `mem[rA + simm] <- rB`.
    Store(MemWidth),
    /// PC-relative conditional branch on `rA`, `rB`.
    Branch(BranchCond),
    /// `ra <- PC + 4`, then absolute jump.
    Call,
    /// Absolute jump.
    Jmpi,
    /// Jump to `rA`.
    Jmp,
    /// `ra <- PC + 4`, then jump to `rA`.
    Callr,
    /// `rC <- PC + 4`.
    NextPc,
}

/// One dispatch table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Assembler mnemonic.
    pub name: &'static str,
    /// Statistics category.
    pub class: InstClass,
    /// Behaviour.
    pub exec: Exec,
}

impl Entry {
    const fn new(name: &'static str, class: InstClass, exec: Exec) -> Self {
        Self { name, class, exec }
    }
}

/// Immutable opcode to behaviour mapping.
#[derive(Debug)]
pub struct DispatchTable {
    primary: [Option<Entry>; TABLE_SIZE],
    extended: [Option<Entry>; TABLE_SIZE],
}

/// The shared Nios II dispatch table, built on first use.
pub static DISPATCH: LazyLock<DispatchTable> = LazyLock::new(DispatchTable::nios2);

impl DispatchTable {
    /// Builds the table for the supported Nios II subset.
    pub fn nios2() -> Self {
        use InstClass::{Alu as A, Branch as B, Load as L, Store as S};

        let mut primary = [None; TABLE_SIZE];
        let mut extended = [None; TABLE_SIZE];

        let i_type = [
            (op::CALL, Entry::new("call", B, Exec::Call)),
            (op::JMPI, Entry::new("jmpi", B, Exec::Jmpi)),
            (op::ADDI, Entry::new("addi", A, Exec::AluImm(AluOp::Add, ImmKind::Signed))),
            (op::MULI, Entry::new("muli", A, Exec::AluImm(AluOp::Mul, ImmKind::Signed))),
            (op::ANDI, Entry::new("andi", A, Exec::AluImm(AluOp::And, ImmKind::Unsigned))),
            (op::ORI, Entry::new("ori", A, Exec::AluImm(AluOp::Or, ImmKind::Unsigned))),
            (op::XORI, Entry::new("xori", A, Exec::AluImm(AluOp::Xor, ImmKind::Unsigned))),
            (op::ANDHI, Entry::new("andhi", A, Exec::AluImm(AluOp::And, ImmKind::High))),
            (op::ORHI, Entry::new("orhi", A, Exec::AluImm(AluOp::Or, ImmKind::High))),
            (op::XORHI, Entry::new("xorhi", A, Exec::AluImm(AluOp::Xor, ImmKind::High))),
            (op::CMPEQI, Entry::new("cmpeqi", A, Exec::AluImm(AluOp::CmpEq, ImmKind::Signed))),
            (op::CMPNEI, Entry::new("cmpnei", A, Exec::AluImm(AluOp::CmpNe, ImmKind::Signed))),
            (op::CMPLTI, Entry::new("cmplti", A, Exec::AluImm(AluOp::CmpLt, ImmKind::Signed))),
            (op::CMPGEI, Entry::new("cmpgei", A, Exec::AluImm(AluOp::CmpGe, ImmKind::Signed))),
            (op::CMPLTUI, Entry::new("cmpltui", A, Exec::AluImm(AluOp::CmpLtu, ImmKind::Unsigned))),
            (op::CMPGEUI, Entry::new("cmpgeui", A, Exec::AluImm(AluOp::CmpGeu, ImmKind::Unsigned))),
            (op::LDW, Entry::new("ldw", L, Exec::Load(MemWidth::Word, false))),
            (op::LDH, Entry::new("ldh", L, Exec::Load(MemWidth::Half, true))),
            (op::LDHU, Entry::new("ldhu", L, Exec::Load(MemWidth::Half, false))),
            (op::LDB, Entry::new("ldb", L, Exec::Load(MemWidth::Byte, true))),
            (op::LDBU, Entry::new("ldbu", L, Exec::Load(MemWidth::Byte, false))),
            (op::STW, Entry::new("stw", S, Exec::Store(MemWidth::Word))),
            (op::STH, Entry::new("sth", S, Exec::Store(MemWidth::Half))),
            (op::STB, Entry::new("stb", S, Exec::Store(MemWidth::Byte))),
            (op::BR, Entry::new("br", B, Exec::Branch(BranchCond::Always))),
            (op::BEQ, Entry::new("beq", B, Exec::Branch(BranchCond::Eq))),
            (op::BNE, Entry::new("bne", B, Exec::Branch(BranchCond::Ne))),
            (op::BLT, Entry::new("blt", B, Exec::Branch(BranchCond::Lt))),
            (op::BGE, Entry::new("bge", B, Exec::Branch(BranchCond::Ge))),
            (op::BLTU, Entry::new("bltu", B, Exec::Branch(BranchCond::Ltu))),
            (op::BGEU, Entry::new("bgeu", B, Exec::Branch(BranchCond::Geu))),
        ];
        for (code, entry) in i_type {
            primary[code as usize] = Some(entry);
        }

        let r_type = [
            (opx::ADD, Entry::new("add", A, Exec::AluReg(AluOp::Add))),
            (opx::SUB, Entry::new("sub", A, Exec::AluReg(AluOp::Sub))),
            (opx::MUL, Entry::new("mul", A, Exec::AluReg(AluOp::Mul))),
            (opx::DIV, Entry::new("div", A, Exec::AluReg(AluOp::Div))),
            (opx::DIVU, Entry::new("divu", A, Exec::AluReg(AluOp::Divu))),
            (opx::AND, Entry::new("and", A, Exec::AluReg(AluOp::And))),
            (opx::OR, Entry::new("or", A, Exec::AluReg(AluOp::Or))),
            (opx::XOR, Entry::new("xor", A, Exec::AluReg(AluOp::Xor))),
            (opx::NOR, Entry::new("nor", A, Exec::AluReg(AluOp::Nor))),
            (opx::SLL, Entry::new("sll", A, Exec::AluReg(AluOp::Sll))),
            (opx::SRL, Entry::new("srl", A, Exec::AluReg(AluOp::Srl))),
            (opx::SRA, Entry::new("sra", A, Exec::AluReg(AluOp::Sra))),
            (opx::ROL, Entry::new("rol", A, Exec::AluReg(AluOp::Rol))),
            (opx::ROR, Entry::new("ror", A, Exec::AluReg(AluOp::Ror))),
            (opx::SLLI, Entry::new("slli", A, Exec::AluShiftImm(AluOp::Sll))),
            (opx::SRLI, Entry::new("srli", A, Exec::AluShiftImm(AluOp::Srl))),
            (opx::SRAI, Entry::new("srai", A, Exec::AluShiftImm(AluOp::Sra))),
            (opx::ROLI, Entry::new("roli", A, Exec::AluShiftImm(AluOp::Rol))),
            (opx::CMPEQ, Entry::new("cmpeq", A, Exec::AluReg(AluOp::CmpEq))),
            (opx::CMPNE, Entry::new("cmpne", A, Exec::AluReg(AluOp::CmpNe))),
            (opx::CMPLT, Entry::new("cmplt", A, Exec::AluReg(AluOp::CmpLt))),
            (opx::CMPGE, Entry::new("cmpge", A, Exec::AluReg(AluOp::CmpGe))),
            (opx::CMPLTU, Entry::new("cmpltu", A, Exec::AluReg(AluOp::CmpLtu))),
            (opx::CMPGEU, Entry::new("cmpgeu", A, Exec::AluReg(AluOp::CmpGeu))),
            (opx::JMP, Entry::new("jmp", B, Exec::Jmp)),
            (opx::RET, Entry::new("ret", B, Exec::Jmp)),
            (opx::CALLR, Entry::new("callr", B, Exec::Callr)),
            (opx::NEXTPC, Entry::new("nextpc", A, Exec::NextPc)),
        ];
        for (code, entry) in r_type {
            extended[code as usize] = Some(entry);
        }

        Self { primary, extended }
    }

    /// Looks up the entry for a decoded instruction.
    ///
    /// Returns `None` if the opcode (or, for R-type, the extended opcode) is
    /// not part of the supported subset.
    pub fn lookup(&self, d: &Decoded) -> Option<&Entry> {
        let slot = if d.op == op::R_TYPE {
            self.extended.get(d.opx as usize)
        } else {
            self.primary.get(d.op as usize)
        };
        slot.and_then(Option::as_ref)
    }

    /// Number of populated entries across both tables.
    pub fn len(&self) -> usize {
        self.primary.iter().chain(self.extended.iter()).flatten().count()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Exec {
    /// Executes the behaviour for one decoded instruction.
    ///
    /// # Arguments
    ///
    /// * `regs` - Register file; reads and writes update access tags.
    /// * `mem`  - Main memory.
    /// * `d`    - The decoded instruction.
    ///
    /// # Returns
    ///
    /// `Some(target)` when the instruction sets the PC explicitly, `None` to
    /// fall through to the next instruction.
    ///
    /// # Errors
    ///
    /// Returns an [`EmulatorFault`] for a zero divisor, a rejected memory
    /// access, or a misaligned jump target. Nothing is modified in that case.
    pub fn run(
        self,
        regs: &mut RegisterFile,
        mem: &mut Memory,
        d: &Decoded,
    ) -> Result<Option<u32>, EmulatorFault> {
        match self {
            Self::AluReg(alu_op) => {
                let a = regs.read(d.a);
                let b = regs.read(d.b);
                if alu_op.is_division() && b == 0 {
                    return Err(EmulatorFault::DivisionByZero { pc: d.pc });
                }
                regs.write(d.c, Alu::execute(alu_op, a, b));
                Ok(None)
            }
            Self::AluShiftImm(alu_op) => {
                let a = regs.read(d.a);
                regs.write(d.c, Alu::execute(alu_op, a, d.imm5));
                Ok(None)
            }
            Self::AluImm(alu_op, kind) => {
                let imm = match kind {
                    ImmKind::Signed => d.simm as u32,
                    ImmKind::Unsigned => d.uimm,
                    ImmKind::High => d.uimm << 16,
                };
                let a = regs.read(d.a);
                regs.write(d.b, Alu::execute(alu_op, a, imm));
                Ok(None)
            }
            Self::Load(width, signed) => {
                let addr = Lsu::effective_address(regs.read(d.a), d.simm);
                let value = Lsu::load(mem, addr, width, signed)
                    .map_err(|e| EmulatorFault::from_memory(d.pc, e))?;
                regs.write(d.b, value);
                Ok(None)
            }
            Self::Store(width) => {
                let addr = Lsu::effective_address(regs.read(d.a), d.simm);
                let value = regs.read(d.b);
                Lsu::store(mem, addr, width, value)
                    .map_err(|e| EmulatorFault::from_memory(d.pc, e))?;
                Ok(None)
            }
            Self::Branch(cond) => {
                let taken = match cond {
                    BranchCond::Always => true,
                    _ => {
                        let a = regs.read(d.a);
                        let b = regs.read(d.b);
                        Bru::taken(cond, a, b)
                    }
                };
                if taken {
                    aligned_target(Bru::branch_target(d.pc, d.simm)).map(Some)
                } else {
                    Ok(None)
                }
            }
            Self::Call => {
                regs.write(REG_RA, d.next_pc());
                Ok(Some(Bru::jump_target(d.pc, d.imm26)))
            }
            Self::Jmpi => Ok(Some(Bru::jump_target(d.pc, d.imm26))),
            Self::Jmp => aligned_target(regs.read(d.a)).map(Some),
            Self::Callr => {
                let target = aligned_target(regs.read(d.a))?;
                regs.write(REG_RA, d.next_pc());
                Ok(Some(target))
            }
            Self::NextPc => {
                regs.write(d.c, d.next_pc());
                Ok(None)
            }
        }
    }
}

/// Accepts a jump or branch target only if it is word-aligned.
fn aligned_target(target: u32) -> Result<u32, EmulatorFault> {
    if target & WORD_ALIGN_MASK != 0 {
        return Err(EmulatorFault::MisalignedPc { address: target });
    }
    Ok(target)
}
