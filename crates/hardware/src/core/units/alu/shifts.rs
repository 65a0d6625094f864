//! ALU shift and rotate operations.
//!
//! Shift and rotate amounts use only the low five bits of the second operand.

use super::AluOp;

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift or rotate operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift or rotate variant).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount (upper bits ignored).
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sh = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i32) >> sh) as u32,
        AluOp::Rol => a.rotate_left(sh),
        AluOp::Ror => a.rotate_right(sh),
        _ => 0,
    }
}
