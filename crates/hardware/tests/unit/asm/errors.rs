//! # Diagnostic Tests
//!
//! Every compile error must carry the 1-based line that caused it.

use crate::common::harness::compile_error;
use niosim_core::common::CompileErrorKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn unknown_mnemonic() {
    let err = compile_error("movi r2, 1\nfrobnicate r1\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, CompileErrorKind::UnknownMnemonic("frobnicate".to_string()));
    assert_eq!(err.to_string(), "line 2: unknown mnemonic `frobnicate`");
}

#[test]
fn duplicate_label() {
    let err = compile_error("a: nop\nb: nop\na: nop\n");
    assert_eq!(err.line, 3);
    assert_eq!(err.kind, CompileErrorKind::DuplicateLabel("a".to_string()));
}

#[test]
fn duplicate_label_on_one_line() {
    let err = compile_error("x: x: nop\n");
    assert_eq!(err.kind, CompileErrorKind::DuplicateLabel("x".to_string()));
}

#[test]
fn undefined_branch_target_names_the_label() {
    let err = compile_error("nop\nbr missing_label\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, CompileErrorKind::UndefinedSymbol("missing_label".to_string()));
    assert!(err.message().contains("missing_label"));
}

#[rstest]
#[case::addi_high("addi r2, r2, 40000", 40000, -32768, 32767)]
#[case::addi_low("addi r2, r2, -32769", -32769, -32768, 32767)]
#[case::andi_negative("andi r2, r2, -1", -1, 0, 65535)]
#[case::shift("slli r2, r2, 32", 32, 0, 31)]
#[case::load_offset("ldw r2, 32768(r3)", 32768, -32768, 32767)]
#[case::subi("subi r2, r2, -32768", 32768, -32768, 32767)]
fn immediate_out_of_range(#[case] source: &str, #[case] value: i64, #[case] min: i64, #[case] max: i64) {
    let err = compile_error(source);
    assert_eq!(err.line, 1);
    assert_eq!(err.kind, CompileErrorKind::ImmediateOutOfRange { value, min, max });
}

#[test]
fn branch_out_of_reach() {
    let err = compile_error(".equ FAR, 0x10000\nbr FAR\n");
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, CompileErrorKind::ImmediateOutOfRange { .. }));
}

#[rstest]
#[case::too_few("add r2, r3")]
#[case::too_many("ret r31")]
#[case::bad_register("add r2, r3, r32")]
#[case::empty_operand("add r2, , r3")]
#[case::bad_memory("ldw r2, r3")]
#[case::misaligned_branch("br 6")]
#[case::call_halt_word("call 0")]
fn malformed_operands(#[case] source: &str) {
    let err = compile_error(source);
    assert_eq!(err.line, 1);
    assert!(
        matches!(err.kind, CompileErrorKind::MalformedOperand(_)),
        "{source}: {err}"
    );
}

#[rstest]
#[case::unknown(".bogus 1")]
#[case::word_without_values(".data\n.word")]
#[case::align_too_large(".align 17")]
#[case::equ_of_label("a: nop\n.equ X, a")]
#[case::equ_shape(".equ X")]
#[case::string_unquoted(".data\n.ascii hello")]
#[case::skip_negative(".data\n.skip -1")]
#[case::global_number(".global 12")]
fn malformed_directives(#[case] source: &str) {
    let err = compile_error(source);
    assert!(
        matches!(err.kind, CompileErrorKind::MalformedDirective(_)),
        "{source}: {err}"
    );
}

#[test]
fn constants_cannot_be_redefined() {
    let err = compile_error(".equ N, 1\n.equ N, 2\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, CompileErrorKind::DuplicateLabel("N".to_string()));
}

#[test]
fn set_is_not_a_directive() {
    let err = compile_error(".equ N, 1\n.set N, 2\n");
    assert_eq!(err.line, 2);
    assert_eq!(
        err.kind,
        CompileErrorKind::MalformedDirective("unknown directive `.set`".to_string())
    );
}

#[test]
fn data_directive_in_text() {
    let err = compile_error("nop\n.word 1\n");
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, CompileErrorKind::WrongSection(_)));
}

#[test]
fn instruction_in_data() {
    let err = compile_error(".data\nnop\n");
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, CompileErrorKind::WrongSection(_)));
}

#[test]
fn undefined_global_reported_at_declaration() {
    let err = compile_error("nop\n.global main\nnop\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, CompileErrorKind::UndefinedSymbol("main".to_string()));
}

#[test]
fn data_value_out_of_range() {
    let err = compile_error(".data\n.byte 1, 256\n");
    assert_eq!(err.line, 2);
    assert_eq!(
        err.kind,
        CompileErrorKind::ImmediateOutOfRange { value: 256, min: -128, max: 255 }
    );
}

#[test]
fn first_error_wins() {
    let err = compile_error("bogus1\nbogus2\n");
    assert_eq!(err.line, 1);
}
