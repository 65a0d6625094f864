//! # Instruction Decode Properties
//!
//! Verifies that `decode()` extracts every field of the I, R, and J formats
//! and sign-extends the 16-bit immediate.

use niosim_core::isa::decode::decode;
use niosim_core::isa::encode::{i_type, j_type, r_type};
use niosim_core::isa::instruction::InstructionBits;
use niosim_core::isa::opcodes::{self as op, opx};
use proptest::prelude::*;

#[test]
fn i_type_fields() {
    let word = i_type(op::ADDI, 3, 7, 0xFFFB);
    let d = decode(word, 0x40);
    assert_eq!(d.op, op::ADDI);
    assert_eq!(d.a, 3);
    assert_eq!(d.b, 7);
    assert_eq!(d.uimm, 0xFFFB);
    assert_eq!(d.simm, -5);
    assert_eq!(d.pc, 0x40);
    assert_eq!(d.next_pc(), 0x44);
}

#[test]
fn r_type_fields() {
    let word = r_type(opx::SRAI, 9, 0, 12, 17);
    let d = decode(word, 0);
    assert_eq!(d.op, op::R_TYPE);
    assert_eq!(d.opx, opx::SRAI);
    assert_eq!(d.a, 9);
    assert_eq!(d.c, 12);
    assert_eq!(d.imm5, 17);
}

#[test]
fn j_type_field() {
    let word = j_type(op::CALL, 0x03FF_FFFF);
    assert_eq!(word.op(), op::CALL);
    assert_eq!(word.imm26(), 0x03FF_FFFF);
}

#[test]
fn add_r3_r2_r2_encoding() {
    assert_eq!(r_type(opx::ADD, 2, 2, 3, 0), 0x1086_883A);
}

proptest! {
    #[test]
    fn i_type_fields_survive_encoding(a in 0usize..32, b in 0usize..32, imm: u16, code in 0u32..64) {
        let d = decode(i_type(code, a, b, u32::from(imm)), 0);
        prop_assert_eq!(d.op, code);
        prop_assert_eq!(d.a, a);
        prop_assert_eq!(d.b, b);
        prop_assert_eq!(d.simm, i32::from(imm as i16));
    }

    #[test]
    fn next_pc_is_pc_plus_four(pc in (0u32..0x3FFF_FFFF).prop_map(|p| p * 4)) {
        prop_assert_eq!(decode(0, pc).next_pc(), pc + 4);
    }
}
