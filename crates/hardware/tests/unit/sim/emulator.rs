//! # Emulator Session Tests
//!
//! End-to-end behaviour of the session context: compile atomicity, run
//! states, faults, reset, PC control, and snapshots.

use std::sync::Arc;

use crate::common::TestContext;
use niosim_core::common::EmulatorFault;
use niosim_core::config::{Config, ConfigError};
use niosim_core::core::arch::AccessState;
use niosim_core::sim::{Emulator, RunExit, RunState};
use pretty_assertions::assert_eq;

#[test]
fn movi_add_halts_after_two_instructions() {
    let mut ctx = TestContext::new().compile("movi r2, 5\nadd r3, r2, r2\n");
    assert_eq!(ctx.run(), 2);
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.reg(3), 10);
    assert_eq!(ctx.pc(), 8);
    assert_eq!(ctx.emu.state(), RunState::Runnable);
}

#[test]
fn loop_sums_a_table() {
    let source = r"
        .data
table:  .word 1, 2, 3, 4, 5
        .equ COUNT, 5

        .text
_start: movia r4, table
        movi r5, COUNT
        mov r2, zero
next:   ldw r6, 0(r4)
        add r2, r2, r6
        addi r4, r4, 4
        subi r5, r5, 1
        bne r5, zero, next
        movia r7, result
        stw r2, 0(r7)

        .data
result: .word 0
";
    let mut ctx = TestContext::new().compile(source);
    let _ = ctx.run();
    assert_eq!(ctx.reg(2), 15);
    let result = ctx.symbol("result");
    assert_eq!(ctx.word(result), 15);
}

#[test]
fn call_and_return() {
    let source = "_start: movi r4, 6\n call double\n mov r5, r2\n br end\ndouble: add r2, r4, r4\n ret\nend: nop\n";
    let mut ctx = TestContext::new().compile(source);
    let _ = ctx.run();
    assert_eq!(ctx.reg(5), 12);
    assert_eq!(ctx.reg(31), 8);
}

#[test]
fn byte_loads_sign_and_zero_extend() {
    let source = ".data\nv: .byte 0x80\n.text\nmovia r2, v\nldb r3, 0(r2)\nldbu r4, 0(r2)\n";
    let mut ctx = TestContext::new().compile(source);
    let _ = ctx.run();
    assert_eq!(ctx.reg(3), 0xFFFF_FF80);
    assert_eq!(ctx.reg(4), 0x80);
}

#[test]
fn store_out_of_bounds_faults_at_its_pc() {
    let source = "movi r2, 7\nmovhi r3, 1\nstw r2, 0(r3)\nmovi r4, 9\n";
    let mut ctx = TestContext::new().compile(source);
    let fault = ctx.emu.run().unwrap_err();
    assert_eq!(fault, EmulatorFault::OutOfBounds { pc: 8, address: 0x10000 });
    assert_eq!(ctx.pc(), 8);
    assert_eq!(ctx.reg(4), 0);
    assert_eq!(ctx.emu.state(), RunState::Faulted);
    assert_eq!(ctx.emu.step(), Err(EmulatorFault::NotRunnable));
}

#[test]
fn division_by_zero_faults() {
    let mut ctx = TestContext::new().compile("movi r2, 1\ndiv r3, r2, zero\n");
    assert_eq!(ctx.emu.run(), Err(EmulatorFault::DivisionByZero { pc: 4 }));
    assert_eq!(ctx.reg(3), 0);
}

#[test]
fn misaligned_load_faults() {
    let mut ctx = TestContext::new().compile("movi r2, 2\nldw r3, 0(r2)\n");
    assert_eq!(
        ctx.emu.run(),
        Err(EmulatorFault::MisalignedAccess { pc: 4, address: 2 })
    );
}

#[test]
fn empty_program_halts_immediately() {
    let mut ctx = TestContext::new().compile("# nothing here\n");
    assert_eq!(ctx.run(), 0);
    assert_eq!(ctx.pc(), 0);
}

#[test]
fn halt_is_sticky() {
    let mut ctx = TestContext::new().compile("nop\n");
    assert_eq!(ctx.emu.step(), Ok(true));
    assert_eq!(ctx.emu.step(), Ok(false));
    assert_eq!(ctx.emu.step(), Ok(false));
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.emu.stats().instructions_retired, 1);
}

#[test]
fn step_before_compile_is_rejected() {
    let mut emu = Emulator::new(Config::default()).unwrap();
    assert_eq!(emu.state(), RunState::Unrunnable);
    assert_eq!(emu.step(), Err(EmulatorFault::NotRunnable));
    assert_eq!(emu.run(), Err(EmulatorFault::NotRunnable));
    assert!(emu.program().is_none());
}

#[test]
fn failed_compile_keeps_previous_program() {
    let mut ctx = TestContext::new().compile("movi r2, 5\nmovi r3, 6\n");
    let before = Arc::clone(ctx.emu.program().unwrap());
    assert_eq!(ctx.emu.step(), Ok(true));

    let err = ctx.emu.compile("movi r2, 5\nbogus\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(Arc::ptr_eq(ctx.emu.program().unwrap(), &before));
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.emu.state(), RunState::Runnable);
}

#[test]
fn undefined_branch_target_keeps_previous_program() {
    let mut ctx = TestContext::new().compile("movi r2, 5\nmovi r3, 6\n");
    let before = Arc::clone(ctx.emu.program().unwrap());
    assert_eq!(ctx.emu.step(), Ok(true));

    let err = ctx.emu.compile("nop\nbr missing_label\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.to_string().contains("missing_label"));
    assert!(Arc::ptr_eq(ctx.emu.program().unwrap(), &before));
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.reg(3), 0);

    assert_eq!(ctx.run(), 1);
    assert_eq!(ctx.reg(3), 6);
}

#[test]
fn compile_zeroes_registers_and_clears_fault() {
    let mut ctx = TestContext::new().compile("movi r2, 1\ndiv r3, r2, zero\n");
    let _ = ctx.emu.run().unwrap_err();
    let _ = ctx.emu.compile("nop\n").unwrap();
    assert_eq!(ctx.emu.state(), RunState::Runnable);
    assert_eq!(ctx.reg(2), 0);
    assert_eq!(ctx.emu.stats().instructions_retired, 0);
}

#[test]
fn reset_restores_memory_and_registers() {
    let source = "_start: movi r2, 7\nmovia r3, val\nstw r2, 0(r3)\n.data\nval: .word 1\n";
    let mut ctx = TestContext::new().compile(source);
    let val = ctx.symbol("val");
    let program = Arc::clone(ctx.emu.program().unwrap());
    let _ = ctx.run();
    assert_eq!(ctx.word(val), 7);

    ctx.emu.reset();
    assert!(Arc::ptr_eq(ctx.emu.program().unwrap(), &program));
    assert_eq!(ctx.word(val), 1);
    assert_eq!(ctx.reg(2), 0);
    assert_eq!(ctx.pc(), 0);
    assert_eq!(ctx.emu.registers().state(2), AccessState::None);
    assert_eq!(ctx.emu.stats().instructions_retired, 0);

    let _ = ctx.run();
    assert_eq!(ctx.word(val), 7);
}

#[test]
fn reset_rewinds_to_entry_label() {
    let mut ctx = TestContext::new().compile("nop\n_start: movi r2, 1\n");
    let _ = ctx.run();
    ctx.emu.reset();
    assert_eq!(ctx.pc(), 4);
}

#[test]
fn reset_keeps_faulted_state() {
    let mut ctx = TestContext::new().compile("movi r2, 1\ndiv r3, r2, zero\n");
    let _ = ctx.emu.run().unwrap_err();
    ctx.emu.reset();
    assert_eq!(ctx.emu.state(), RunState::Faulted);
    assert_eq!(ctx.pc(), 0);
}

#[test]
fn misaligned_program_start_is_rejected() {
    let mut config = Config::default();
    config.memory.program_start = 2;
    let err = Emulator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
}

#[test]
fn program_start_outside_memory_is_rejected() {
    let mut config = Config::default();
    config.memory.size = 1024;
    config.memory.program_start = 1024;
    assert!(matches!(Emulator::new(config), Err(ConfigError::Invalid(_))));
}

#[test]
fn relocated_origin_starts_aligned() {
    let mut config = Config::default();
    config.memory.program_start = 0x100;
    let mut ctx = TestContext::with_config(config);
    assert_eq!(ctx.pc(), 0x100);
    ctx = ctx.compile("movi r2, 5\n");
    assert_eq!(ctx.emu.program().unwrap().start_address, 0x100);
    assert_eq!(ctx.run(), 1);
    assert_eq!(ctx.pc(), 0x104);
}

#[test]
fn program_filling_memory_loads_and_runs() {
    let mut config = Config::default();
    config.memory.size = 16;
    let source = "movia r2, v\n.data\nv: .word 7\n";
    let mut ctx = TestContext::with_config(config).compile(source);
    assert_eq!(ctx.emu.program().unwrap().data_end(), 16);
    assert_eq!(ctx.run(), 2);
    assert_eq!(ctx.word(ctx.reg(2)), 7);
}

#[test]
fn write_pc_requires_alignment() {
    let mut ctx = TestContext::new().compile("nop\nnop\n");
    assert_eq!(
        ctx.emu.write_pc(6),
        Err(EmulatorFault::MisalignedPc { address: 6 })
    );
    assert_eq!(ctx.pc(), 0);
    ctx.emu.write_pc(4).unwrap();
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.run(), 1);
}

#[test]
fn run_for_stops_at_budget() {
    let mut ctx = TestContext::new().compile("loop: br loop\n");
    assert_eq!(ctx.emu.run_for(100), Ok(RunExit::StepLimit));
    assert_eq!(ctx.emu.stats().instructions_retired, 100);
    assert_eq!(ctx.pc(), 0);
}

#[test]
fn run_for_reports_halt() {
    let mut ctx = TestContext::new().compile("nop\nnop\n");
    assert_eq!(ctx.emu.run_for(100), Ok(RunExit::Halted));
}

#[test]
fn run_limited_uses_configured_limit() {
    let mut config = Config::default();
    config.general.step_limit = Some(10);
    let mut ctx = TestContext::with_config(config).compile("loop: br loop\n");
    assert_eq!(ctx.emu.run_limited(), Ok(RunExit::StepLimit));
    assert_eq!(ctx.emu.stats().instructions_retired, 10);
}

#[test]
fn snapshot_serializes_tags() {
    let mut ctx = TestContext::new().compile("movi r2, 5\n");
    assert_eq!(ctx.emu.step(), Ok(true));
    let snapshot = ctx.emu.snapshot();
    assert_eq!(snapshot.pc, 4);
    assert_eq!(snapshot.registers.len(), 32);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["registers"][2]["state"], "WRITE");
    assert_eq!(json["registers"][2]["value"], 5);
    assert_eq!(json["registers"][3]["state"], "NONE");
    assert_eq!(json["state"], "runnable");
    assert_eq!(json["stats"]["instructions_retired"], 1);
}

#[test]
fn identical_sessions_are_deterministic() {
    let source = "_start: movi r2, 3\nloop: addi r3, r3, 2\nsubi r2, r2, 1\nbne r2, zero, loop\n";
    let mut a = TestContext::new().compile(source);
    let mut b = TestContext::new().compile(source);
    assert_eq!(a.run(), b.run());
    assert_eq!(a.emu.snapshot(), b.emu.snapshot());
    assert_eq!(a.emu.memory(), b.emu.memory());
}
