//! # Linker Tests
//!
//! Layout under non-default configurations and the errors raised when the
//! sections do not fit.

use niosim_core::asm::Assembler;
use niosim_core::common::{CompileError, CompileErrorKind};
use niosim_core::config::Config;
use niosim_core::isa::encode::j_type;
use niosim_core::isa::opcodes as op;
use niosim_core::sim::Program;
use niosim_core::sim::linker::{SegmentSummary, plan};
use pretty_assertions::assert_eq;

fn assemble_with(config: &Config, source: &str) -> Result<Program, CompileError> {
    crate::common::harness::init_tracing();
    Assembler::new(config).assemble(source)
}

fn config_with(size: usize, program_start: u32, data_offset: Option<u32>) -> Config {
    let mut config = Config::default();
    config.memory.size = size;
    config.memory.program_start = program_start;
    config.memory.data_offset = data_offset;
    config
}

#[test]
fn data_offset_places_data() {
    let config = config_with(0x1000, 0, Some(0x100));
    let program = assemble_with(&config, "nop\n.data\nv: .word 3\n").unwrap();
    assert_eq!(program.data_origin, 0x100);
    assert_eq!(program.symbol("v"), Some(0x100));
}

#[test]
fn data_offset_relative_to_program_start() {
    let config = config_with(0x1000, 0x200, Some(0x100));
    let program = assemble_with(&config, "nop\n.data\nv: .word 3\n").unwrap();
    assert_eq!(program.data_origin, 0x300);
}

#[test]
fn data_overlapping_code_is_rejected() {
    let config = config_with(0x1000, 0, Some(4));
    let err = assemble_with(&config, "nop\nnop\n.data\n.word 1\n").unwrap_err();
    assert_eq!(err.line, 4);
    assert!(matches!(err.kind, CompileErrorKind::Layout(_)));
}

#[test]
fn data_may_not_cover_the_halt_word() {
    let config = config_with(0x1000, 0, Some(4));
    let err = assemble_with(&config, "nop\n.data\n.word 1\n").unwrap_err();
    assert!(matches!(err.kind, CompileErrorKind::Layout(_)));
}

#[test]
fn empty_data_ignores_offset_overlap() {
    let config = config_with(0x1000, 0, Some(0));
    let program = assemble_with(&config, "nop\nnop\n").unwrap();
    assert!(program.data.is_empty());
}

#[test]
fn code_and_halt_word_must_fit() {
    let config = config_with(8, 0, None);
    let err = assemble_with(&config, "nop\nnop\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, CompileErrorKind::Layout(_)));

    assert!(assemble_with(&config, "nop\n").is_ok());
}

#[test]
fn data_must_fit() {
    let config = config_with(16, 0, None);
    let err = assemble_with(&config, "nop\n.data\n.word 1\n.skip 20\n").unwrap_err();
    assert_eq!(err.line, 4);
    assert!(matches!(err.kind, CompileErrorKind::Layout(_)));
}

#[test]
fn program_start_relocates_labels() {
    let config = config_with(0x1000, 0x100, None);
    let program = assemble_with(&config, "_start: call f\nf: ret\n.data\nd: .byte 1\n").unwrap();
    assert_eq!(program.code_origin, 0x100);
    assert_eq!(program.start_address, 0x100);
    assert_eq!(program.symbol("f"), Some(0x104));
    assert_eq!(program.data_origin, 0x10C);
    assert_eq!(program.words().next(), Some(j_type(op::CALL, 0x104 >> 2)));
    assert_eq!(program.listing[0].address, 0x100);
}

#[test]
fn entry_label_in_data_is_ignored() {
    let program = assemble_with(
        &Config::default(),
        ".data\n_start: .word 1\n.text\nnop\nnop\n",
    )
    .unwrap();
    assert_eq!(program.start_address, 0);
}

#[test]
fn custom_entry_label() {
    let mut config = Config::default();
    config.assembler.entry_label = "main".to_string();
    let program = assemble_with(&config, "nop\nmain: nop\n_start: nop\n").unwrap();
    assert_eq!(program.start_address, 4);
}

#[test]
fn plan_rounds_data_to_its_alignment() {
    let seg = SegmentSummary {
        text_size: 8,
        data_size: 4,
        data_align: 16,
        last_text_line: 2,
        last_data_line: 4,
    };
    let layout = plan(&Config::default(), &seg).unwrap();
    assert_eq!(layout.text_origin, 0);
    assert_eq!(layout.halt_address(), 8);
    assert_eq!(layout.data_origin, 16);
}

#[test]
fn plan_reports_line_one_for_empty_sections() {
    let config = config_with(4, 0, None);
    let seg = SegmentSummary {
        text_size: 4,
        data_align: 4,
        ..SegmentSummary::default()
    };
    let err = plan(&config, &seg).unwrap_err();
    assert_eq!(err.line, 1);
}
