//! Two-Pass Nios II Assembler.
//!
//! This module turns assembly source into a linked [`Program`]. It contains:
//! 1. **Source:** Line splitting, comments, labels, and operand lists.
//! 2. **Expressions:** Integer expressions with symbols and `%hi`/`%lo`/`%hiadj`.
//! 3. **Pass 1:** Symbol definition and section sizing.
//! 4. **Pass 2:** Instruction and data encoding with final addresses.
//!
//! Layout and program emission live in [`crate::sim::linker`]. The first
//! error aborts the compile.

/// Expression parsing and evaluation.
pub mod expr;
/// Mnemonic table and instruction encoding.
pub mod mnemonic;
/// Operand parsing and range checks.
pub mod operand;
/// Pass 1: symbols and section sizes.
pub mod pass1;
/// Pass 2: encoding.
pub mod pass2;
/// Line-level source parsing.
pub mod source;
/// Symbol table.
pub mod symbols;

use tracing::{info, warn};

use crate::common::error::CompileError;
use crate::config::Config;
use crate::sim::linker;
use crate::sim::program::Program;

/// Assembler bound to one configuration.
#[derive(Clone, Debug)]
pub struct Assembler<'c> {
    config: &'c Config,
}

impl<'c> Assembler<'c> {
    /// Creates an assembler that lays programs out for `config`.
    pub const fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Assembles and links `source`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] found by either pass or the linker.
    ///
    /// # Examples
    ///
    /// ```
    /// use niosim_core::Config;
    /// use niosim_core::asm::Assembler;
    ///
    /// let config = Config::default();
    /// let program = Assembler::new(&config).assemble("movi r2, 5\n").unwrap();
    /// assert_eq!(program.words().next(), Some(0x0080_0144));
    /// ```
    pub fn assemble(&self, source: &str) -> Result<Program, CompileError> {
        let result = self.assemble_inner(source);
        match &result {
            Ok(program) => info!(
                instructions = program.instruction_count(),
                data_bytes = program.data.len(),
                start = program.start_address,
                "assembly complete"
            ),
            Err(e) => warn!(line = e.line, "assembly failed: {}", e.kind),
        }
        result
    }

    fn assemble_inner(&self, source: &str) -> Result<Program, CompileError> {
        let mut first = pass1::run(source)?;
        let layout = linker::plan(self.config, &first.segments)?;
        first
            .symbols
            .relocate(layout.text_origin, layout.data_origin);
        let image = pass2::run(&first, &layout)?;
        linker::link(
            self.config,
            layout,
            first.symbols,
            &first.globals,
            image,
        )
    }
}
