//! # Directive and Layout Tests
//!
//! Covers section switching, data emission, alignment, constants, `.end`,
//! and where labels land relative to padding and section changes.

use crate::common::harness::{assemble, words};
use niosim_core::asm::symbols::SymbolKind;
use niosim_core::common::constants::NOP_INSTRUCTION;
use pretty_assertions::assert_eq;

const DATA_LAYOUT: &str = r#"
        .data
val:    .word 0x11223344, -1
b:      .byte 1, 2, 'A'
        .align 2
h:      .hword 0xBEEF
s:      .asciz "hi\n"

        .text
_start: movia r2, val
        ldw r3, 0(r2)
"#;

#[test]
fn data_follows_code_and_halt_word() {
    let program = assemble(DATA_LAYOUT).unwrap();
    assert_eq!(program.code.len(), 12);
    assert_eq!(program.data_origin, 16);
    assert_eq!(program.data.len(), 18);
    assert_eq!(program.symbol("val"), Some(16));
    assert_eq!(program.symbol("b"), Some(24));
    assert_eq!(program.symbol("h"), Some(28));
    assert_eq!(program.symbol("s"), Some(30));
}

#[test]
fn data_bytes_are_little_endian() {
    let program = assemble(DATA_LAYOUT).unwrap();
    assert_eq!(
        program.data,
        vec![
            0x44, 0x33, 0x22, 0x11, // val[0]
            0xFF, 0xFF, 0xFF, 0xFF, // val[1]
            1, 2, b'A', // b
            0,    // .align 2
            0xEF, 0xBE, // h
            b'h', b'i', b'\n', 0, // s
        ]
    );
}

#[test]
fn data_labels_resolve_in_code() {
    let program = assemble(DATA_LAYOUT).unwrap();
    let code: Vec<u32> = program.words().collect();
    // movia r2, 16 -> orhi r2, zero, 0 ; addi r2, r2, 16
    assert_eq!((code[0] >> 6) & 0xFFFF, 0);
    assert_eq!((code[1] >> 6) & 0xFFFF, 16);
}

#[test]
fn text_align_pads_with_nops() {
    let source = "nop\n.align 3\nhere: movi r2, 1\n";
    let program = assemble(source).unwrap();
    let code: Vec<u32> = program.words().collect();
    assert_eq!(code.len(), 3);
    assert_eq!(code[1], NOP_INSTRUCTION);
    assert_eq!(program.symbol("here"), Some(8));
    assert_eq!(program.listing[1].line, 2);
}

#[test]
fn label_before_align_binds_after_padding() {
    let source = ".data\n.byte 1\nw: .align 2\n.word 5\n";
    let program = assemble(source).unwrap();
    assert_eq!(program.symbol("w"), Some(i64::from(program.data_origin) + 4));
}

#[test]
fn data_alignment_raises_data_origin() {
    let source = "nop\nnop\nnop\n.data\n.align 4\nbuf: .word 1\n";
    let program = assemble(source).unwrap();
    // 12 bytes of code + halt word = 16, already 16-aligned.
    assert_eq!(program.data_origin, 16);

    let program = assemble("nop\n.data\n.align 4\nbuf: .word 1\n").unwrap();
    assert_eq!(program.data_origin, 16);
    assert_eq!(program.symbol("buf"), Some(16));
}

#[test]
fn skip_fills_with_value() {
    let source = ".data\nbuf: .skip 3, 0xAA\nnext: .byte 1\n.space 2\n";
    let program = assemble(source).unwrap();
    assert_eq!(program.data, vec![0xAA, 0xAA, 0xAA, 1, 0, 0]);
    assert_eq!(program.symbol("next"), Some(i64::from(program.data_origin) + 3));
}

#[test]
fn ascii_has_no_terminator() {
    let program = assemble(".data\n.ascii \"ab\"\n.string \"c\"\n").unwrap();
    assert_eq!(program.data, b"abc\0".to_vec());
}

#[test]
fn equ_defines_constants() {
    let source = ".equ SIZE, 4\n.equ DOUBLE, SIZE + SIZE\n.data\n.skip DOUBLE\n.word SIZE\n";
    let program = assemble(source).unwrap();
    assert_eq!(program.data.len(), 12);
    let size = program.symbols.get("DOUBLE").unwrap();
    assert_eq!(size.kind, SymbolKind::Absolute);
    assert_eq!(size.value, 8);
}

#[test]
fn end_stops_assembly() {
    assert_eq!(words("movi r2, 1\n.end\nthis is not assembly\n").len(), 1);
}

#[test]
fn several_labels_share_an_address() {
    let program = assemble("a:\nb: c: nop\n").unwrap();
    for name in ["a", "b", "c"] {
        assert_eq!(program.symbol(name), Some(0), "{name}");
    }
}

#[test]
fn trailing_label_marks_end_of_section() {
    let program = assemble("nop\nnop\nlast:\n").unwrap();
    let sym = program.symbols.get("last").unwrap();
    assert_eq!(sym.kind, SymbolKind::Text);
    assert_eq!(sym.value, 8);
}

#[test]
fn label_before_section_switch_stays_in_old_section() {
    let program = assemble("nop\nafter:\n.data\nd: .word 1\n").unwrap();
    assert_eq!(program.symbols.get("after").unwrap().kind, SymbolKind::Text);
    assert_eq!(program.symbol("after"), Some(4));
    assert_eq!(program.symbols.get("d").unwrap().kind, SymbolKind::Data);
}

#[test]
fn sections_can_be_reopened() {
    let source = ".data\nx: .word 1\n.text\nmovi r2, 1\n.data\ny: .word 2\n.text\nmovi r3, 2\n";
    let program = assemble(source).unwrap();
    assert_eq!(program.instruction_count(), 2);
    assert_eq!(program.data.len(), 8);
    assert_eq!(program.symbol("y"), Some(i64::from(program.data_origin) + 4));
}

#[test]
fn entry_label_sets_start_address() {
    let program = assemble(".global _start\nnop\n_start: nop\n").unwrap();
    assert_eq!(program.start_address, 4);
}

#[test]
fn missing_entry_label_starts_at_origin() {
    let program = assemble("nop\nmain: nop\n").unwrap();
    assert_eq!(program.start_address, 0);
}

#[test]
fn word_values_may_reference_labels() {
    let program = assemble("f: nop\ng: nop\n.data\ntable: .word f, g, table\n").unwrap();
    let origin = program.data_origin;
    let expected: Vec<u8> = [0u32, 4, origin]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();
    assert_eq!(program.data, expected);
}
