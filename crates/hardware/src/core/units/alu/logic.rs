//! ALU logical and comparison operations.
//!
//! Compares produce `1` when the relation holds and `0` otherwise.

use super::AluOp;

/// Executes a bitwise or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic or compare variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for opcodes not handled here.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Nor => !(a | b),
        AluOp::CmpEq => u32::from(a == b),
        AluOp::CmpNe => u32::from(a != b),
        AluOp::CmpLt => u32::from((a as i32) < (b as i32)),
        AluOp::CmpGe => u32::from((a as i32) >= (b as i32)),
        AluOp::CmpLtu => u32::from(a < b),
        AluOp::CmpGeu => u32::from(a >= b),
        _ => 0,
    }
}
