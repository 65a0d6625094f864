//! ALU arithmetic operations.
//!
//! Implements wrapping addition, subtraction and multiplication plus signed
//! and unsigned division on 32-bit operands. `i32::MIN / -1` wraps to
//! `i32::MIN`.

use super::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - Dividend, minuend, or first addend.
/// * `b`  - Divisor, subtrahend, or second addend.
///
/// # Returns
///
/// The 32-bit result. Division by zero and non-arithmetic opcodes return `0`.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => {
            if b == 0 {
                0
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        AluOp::Divu => a.checked_div(b).unwrap_or(0),
        _ => 0,
    }
}
