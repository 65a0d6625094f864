//! Branch Resolution Unit (BRU).
//!
//! Evaluates branch conditions and computes control-flow targets:
//! 1. **Conditional Branches:** PC-relative, offset from the following instruction.
//! 2. **Absolute Jumps:** `call`/`jmpi`, which keep the top four PC bits.

use crate::common::constants::{JUMP_REGION_MASK, WORD_SIZE};

/// Branch condition evaluated over `rA` and `rB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchCond {
    /// Always taken (`br`).
    Always,
    /// `rA == rB`.
    Eq,
    /// `rA != rB`.
    Ne,
    /// `rA < rB`, signed.
    Lt,
    /// `rA >= rB`, signed.
    Ge,
    /// `rA < rB`, unsigned.
    Ltu,
    /// `rA >= rB`, unsigned.
    Geu,
}

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Returns whether the branch is taken.
    pub fn taken(cond: BranchCond, a: u32, b: u32) -> bool {
        match cond {
            BranchCond::Always => true,
            BranchCond::Eq => a == b,
            BranchCond::Ne => a != b,
            BranchCond::Lt => (a as i32) < (b as i32),
            BranchCond::Ge => (a as i32) >= (b as i32),
            BranchCond::Ltu => a < b,
            BranchCond::Geu => a >= b,
        }
    }

    /// Target of a PC-relative branch at `pc` with byte offset `offset`.
    pub const fn branch_target(pc: u32, offset: i32) -> u32 {
        pc.wrapping_add(WORD_SIZE).wrapping_add(offset as u32)
    }

    /// Target of a J-type jump at `pc` with word index `imm26`.
    pub const fn jump_target(pc: u32, imm26: u32) -> u32 {
        (pc & JUMP_REGION_MASK) | (imm26 << 2)
    }
}
