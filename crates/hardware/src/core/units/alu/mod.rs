//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU shared by the R-type and
//! I-type handlers. Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Divu
//! - [`logic`]:      And, Or, Xor, Nor, and the six compares
//! - [`shifts`]:     Sll, Srl, Sra, Rol, Ror

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift and rotate operations.
pub mod shifts;

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Low 32 bits of the product.
    Mul,
    /// Signed division, truncating toward zero.
    Div,
    /// Unsigned division.
    Divu,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// `1` if equal.
    CmpEq,
    /// `1` if not equal.
    CmpNe,
    /// `1` if less-than, signed.
    CmpLt,
    /// `1` if greater-or-equal, signed.
    CmpGe,
    /// `1` if less-than, unsigned.
    CmpLtu,
    /// `1` if greater-or-equal, unsigned.
    CmpGeu,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Rotate left.
    Rol,
    /// Rotate right.
    Ror,
}

impl AluOp {
    /// Returns `true` for the operations that fault on a zero divisor.
    pub const fn is_division(self) -> bool {
        matches!(self, Self::Div | Self::Divu)
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift or rotate amount)
    ///
    /// # Returns
    ///
    /// The 32-bit result. Division by zero yields `0`; callers that must
    /// fault check [`AluOp::is_division`] and the divisor first.
    ///
    /// # Examples
    ///
    /// ```
    /// use niosim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::CmpLt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 7), 14);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div | AluOp::Divu => {
                arithmetic::execute(op, a, b)
            }

            AluOp::And
            | AluOp::Or
            | AluOp::Xor
            | AluOp::Nor
            | AluOp::CmpEq
            | AluOp::CmpNe
            | AluOp::CmpLt
            | AluOp::CmpGe
            | AluOp::CmpLtu
            | AluOp::CmpGeu => logic::execute(op, a, b),

            AluOp::Sll | AluOp::Srl | AluOp::Sra | AluOp::Rol | AluOp::Ror => {
                shifts::execute(op, a, b)
            }
        }
    }
}
