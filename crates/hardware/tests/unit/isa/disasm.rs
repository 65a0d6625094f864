//! # Disassembler Tests

use niosim_core::isa::disasm::disassemble;
use niosim_core::isa::encode::{i_type, j_type, r_type};
use niosim_core::isa::opcodes::{self as op, opx};
use rstest::rstest;

#[rstest]
#[case::halt(0, "halt")]
#[case::nop(0x0001_883A, "nop")]
#[case::addi(0x0080_0144, "addi r2, zero, 5")]
#[case::addi_negative(i_type(op::ADDI, 2, 3, 0xFFFF), "addi r3, r2, -1")]
#[case::ori_hex(i_type(op::ORI, 0, 4, 0xFF), "ori r4, zero, 0xff")]
#[case::ldw(i_type(op::LDW, 27, 2, 8), "ldw r2, 8(sp)")]
#[case::stb(i_type(op::STB, 5, 6, 0xFFFC), "stb r6, -4(r5)")]
#[case::beq(i_type(op::BEQ, 2, 3, 0xFFF8), "beq r2, r3, -8")]
#[case::br(i_type(op::BR, 0, 0, 12), "br 12")]
#[case::call(j_type(op::CALL, 4), "call 0x10")]
#[case::add(r_type(opx::ADD, 2, 2, 3, 0), "add r3, r2, r2")]
#[case::slli(r_type(opx::SLLI, 4, 0, 4, 2), "slli r4, r4, 2")]
#[case::ret(r_type(opx::RET, 31, 0, 0, 0), "ret")]
#[case::callr(r_type(opx::CALLR, 8, 0, 31, 0), "callr r8")]
#[case::nextpc(r_type(opx::NEXTPC, 0, 0, 9, 0), "nextpc r9")]
#[case::unknown_opx(r_type(0x3F, 0, 0, 0, 0), "unknown")]
fn disassembles(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(disassemble(word), expected);
}
