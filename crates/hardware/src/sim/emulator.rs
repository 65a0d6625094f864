//! Emulator Execution Context.
//!
//! The [`Emulator`] owns everything a session needs and is the only way hosts drive it:
//! 1. **Compile:** Assembles and links source; on success the program, memory,
//!    and PC are replaced together, on failure nothing changes.
//! 2. **Execution:** `step`, `run`, and bounded runs over the loaded program.
//! 3. **Control:** `reset` and PC reads/writes.
//! 4. **Observation:** Snapshots and [`EmulatorObserver`] notifications.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::asm::Assembler;
use crate::common::error::{CompileError, CompileErrorKind, EmulatorFault};
use crate::config::{Config, ConfigError};
use crate::core::Cpu;
use crate::core::arch::{RegisterFile, RegisterSnapshot};
use crate::sim::observer::EmulatorObserver;
use crate::sim::program::Program;
use crate::soc::memory::Memory;
use crate::stats::ExecStats;

/// Whether `step` and `run` are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// No program has been compiled yet.
    #[default]
    Unrunnable,
    /// A program is loaded and has not faulted.
    Runnable,
    /// The last run faulted; only a new compile makes the core runnable again.
    Faulted,
}

/// Why a bounded run stopped without a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunExit {
    /// The halt sentinel was fetched.
    Halted,
    /// The step budget ran out first.
    StepLimit,
}

/// Owned copy of the visible machine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MachineSnapshot {
    /// Program counter.
    pub pc: u32,
    /// Every register with its access tag.
    pub registers: Vec<RegisterSnapshot>,
    /// Statistics since the last compile or reset.
    pub stats: ExecStats,
    /// Current run state.
    pub state: RunState,
}

/// A single-threaded emulator session.
pub struct Emulator {
    config: Config,
    program: Option<Arc<Program>>,
    image: Memory,
    cpu: Cpu,
    state: RunState,
    observers: Vec<Box<dyn EmulatorObserver>>,
}

impl fmt::Debug for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emulator")
            .field("pc", &self.cpu.pc)
            .field("state", &self.state)
            .field("program", &self.program.is_some())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Emulator {
    /// Creates an emulator with no program loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if [`Config::validate`] rejects
    /// `config`, e.g. a program origin that is not word-aligned.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let cpu = Cpu::new(&config);
        Ok(Self {
            image: cpu.memory.clone(),
            cpu,
            config,
            program: None,
            state: RunState::Unrunnable,
            observers: Vec::new(),
        })
    }

    /// Registers an observer; observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn EmulatorObserver>) {
        self.observers.push(observer);
    }

    /// Assembles, links, and loads `source`.
    ///
    /// On success the new program, a fresh memory, zeroed registers, and the
    /// PC at the program's start address replace the previous session state.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`]; the previous program, memory, and
    /// PC are left untouched.
    pub fn compile(&mut self, source: &str) -> Result<Arc<Program>, CompileError> {
        match self.build(source) {
            Ok((program, cpu)) => {
                let program = Arc::new(program);
                self.image = cpu.memory.clone();
                self.cpu = cpu;
                self.program = Some(Arc::clone(&program));
                self.state = RunState::Runnable;
                for observer in &mut self.observers {
                    observer.on_compiled(&program);
                }
                Ok(program)
            }
            Err(e) => {
                for observer in &mut self.observers {
                    observer.on_compile_failed(&e);
                }
                Err(e)
            }
        }
    }

    fn build(&self, source: &str) -> Result<(Program, Cpu), CompileError> {
        let program = Assembler::new(&self.config).assemble(source)?;
        // `linker::plan` has already bounded both sections by `memory.size`.
        let cpu = Cpu::with_program(&program, &self.config).map_err(|e| {
            CompileError::new(1, CompileErrorKind::Layout(format!("program does not load: {e}")))
        })?;
        Ok((program, cpu))
    }

    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if an instruction retired, `Ok(false)` at the halt sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorFault::NotRunnable`] without a runnable program, or the
    /// fault raised by the instruction; the core is then
    /// [`RunState::Faulted`].
    pub fn step(&mut self) -> Result<bool, EmulatorFault> {
        if self.state != RunState::Runnable {
            return Err(EmulatorFault::NotRunnable);
        }
        match self.cpu.step() {
            Ok(true) => {
                for observer in &mut self.observers {
                    observer.on_step(self.cpu.pc, &self.cpu.regs, &self.cpu.memory);
                }
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(fault) => {
                warn!(%fault, "execution faulted");
                self.state = RunState::Faulted;
                for observer in &mut self.observers {
                    observer.on_fault(&fault);
                }
                Err(fault)
            }
        }
    }

    /// Steps until the halt sentinel.
    ///
    /// # Returns
    ///
    /// Number of instructions retired by this call.
    ///
    /// # Errors
    ///
    /// Same as [`Emulator::step`]; the run stops at the first fault.
    pub fn run(&mut self) -> Result<u64, EmulatorFault> {
        let mut retired = 0;
        while self.step()? {
            retired += 1;
        }
        Ok(retired)
    }

    /// Steps until the halt sentinel or until `max_steps` instructions retired.
    ///
    /// # Errors
    ///
    /// Same as [`Emulator::step`].
    pub fn run_for(&mut self, max_steps: u64) -> Result<RunExit, EmulatorFault> {
        for _ in 0..max_steps {
            if !self.step()? {
                return Ok(RunExit::Halted);
            }
        }
        Ok(RunExit::StepLimit)
    }

    /// Runs with the configured `general.step_limit`, unbounded if unset.
    ///
    /// # Errors
    ///
    /// Same as [`Emulator::step`].
    pub fn run_limited(&mut self) -> Result<RunExit, EmulatorFault> {
        match self.config.general.step_limit {
            Some(limit) => self.run_for(limit),
            None => self.run().map(|_| RunExit::Halted),
        }
    }

    /// Zeroes registers and tags, reloads memory from the linked program, and
    /// rewinds the PC to the start address.
    ///
    /// The loaded program and the run state are unchanged.
    pub fn reset(&mut self) {
        let start = self
            .program
            .as_ref()
            .map_or(self.config.memory.program_start, |p| p.start_address);
        self.cpu.reset(&self.image, start);
        debug!(pc = start, "machine reset");
        for observer in &mut self.observers {
            observer.on_reset();
        }
    }

    /// Returns the program counter.
    pub const fn read_pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Overwrites the program counter.
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorFault::MisalignedPc`] if `value` is not a multiple of
    /// 4; the PC is left unchanged.
    pub fn write_pc(&mut self, value: u32) -> Result<(), EmulatorFault> {
        self.cpu.write_pc(value)
    }

    /// Returns an owned copy of the visible state.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            pc: self.cpu.pc,
            registers: self.cpu.regs.snapshot(),
            stats: self.cpu.stats,
            state: self.state,
        }
    }

    /// Returns the current run state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Returns the loaded program, if any.
    pub fn program(&self) -> Option<&Arc<Program>> {
        self.program.as_ref()
    }

    /// Returns the register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.cpu.regs
    }

    /// Returns main memory.
    pub const fn memory(&self) -> &Memory {
        &self.cpu.memory
    }

    /// Returns the execution statistics.
    pub const fn stats(&self) -> &ExecStats {
        &self.cpu.stats
    }

    /// Returns the CPU.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
