//! Linker: Layout and Program Emission.
//!
//! This module places the assembled sections in memory. It performs the following:
//! 1. **Layout:** Code at the program origin, one reserved halt word after it, and data
//!    either at a configured offset or right after the halt word.
//! 2. **Validation:** Both sections must fit in memory and must not overlap.
//! 3. **Emission:** Checks `.global` declarations, picks the start address, and
//!    produces the immutable [`Program`].
//!
//! Layout happens between the two assembler passes, so pass 2 sees final
//! addresses and the emitted program needs no relocation.

use tracing::debug;

use crate::asm::pass2::Image;
use crate::asm::symbols::{SymbolKind, SymbolTable};
use crate::common::constants::WORD_SIZE;
use crate::common::error::{CompileError, CompileErrorKind};
use crate::config::Config;
use crate::sim::program::Program;

/// Section sizes gathered by pass 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentSummary {
    /// Text section size in bytes.
    pub text_size: u32,
    /// Data section size in bytes.
    pub data_size: u32,
    /// Largest alignment requested in the data section.
    pub data_align: u32,
    /// Last line that emitted into the text section (0 if none).
    pub last_text_line: usize,
    /// Last line that emitted into the data section (0 if none).
    pub last_data_line: usize,
}

/// Final placement of both sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Address of the first instruction.
    pub text_origin: u32,
    /// Text size in bytes, excluding the halt word.
    pub text_size: u32,
    /// Address of the first data byte.
    pub data_origin: u32,
    /// Data size in bytes.
    pub data_size: u32,
}

impl Layout {
    /// Address of the reserved halt word after the code.
    pub const fn halt_address(&self) -> u32 {
        self.text_origin + self.text_size
    }
}

/// Computes the section layout for the configured memory.
///
/// # Errors
///
/// Returns a [`CompileErrorKind::Layout`] error at the last line emitting into
/// the offending section if the code and its halt word or the data do not fit
/// in memory, or if the data overlaps them.
pub fn plan(config: &Config, seg: &SegmentSummary) -> Result<Layout, CompileError> {
    let mem_size = config.memory.size as u64;
    let text_origin = config.memory.program_start;
    let text_line = seg.last_text_line.max(1);
    let data_line = seg.last_data_line.max(1);

    let text_limit = u64::from(text_origin) + u64::from(seg.text_size) + u64::from(WORD_SIZE);
    if text_limit > mem_size {
        return Err(CompileError::new(
            text_line,
            CompileErrorKind::Layout(format!(
                "code ({} bytes at {text_origin:#x}) and its halt word exceed {mem_size} bytes of memory",
                seg.text_size
            )),
        ));
    }

    let data_origin = match config.memory.data_offset {
        Some(offset) => u64::from(text_origin) + u64::from(offset),
        None => text_limit.next_multiple_of(u64::from(seg.data_align.max(WORD_SIZE))),
    };
    let data_end = data_origin + u64::from(seg.data_size);
    if seg.data_size > 0 {
        if data_end > mem_size {
            return Err(CompileError::new(
                data_line,
                CompileErrorKind::Layout(format!(
                    "data ({} bytes at {data_origin:#x}) exceeds {mem_size} bytes of memory",
                    seg.data_size
                )),
            ));
        }
        if data_origin < text_limit && u64::from(text_origin) < data_end {
            return Err(CompileError::new(
                data_line,
                CompileErrorKind::Layout(format!(
                    "data at {data_origin:#x} overlaps the code ending at {text_limit:#x}"
                )),
            ));
        }
    }
    let data_origin = u32::try_from(data_origin).map_err(|_| {
        CompileError::new(
            data_line,
            CompileErrorKind::Layout(format!("data origin {data_origin:#x} exceeds 32 bits")),
        )
    })?;

    let layout = Layout {
        text_origin,
        text_size: seg.text_size,
        data_origin,
        data_size: seg.data_size,
    };
    debug!(
        text_origin = layout.text_origin,
        text_size = layout.text_size,
        data_origin = layout.data_origin,
        data_size = layout.data_size,
        "layout planned"
    );
    Ok(layout)
}

/// Emits the linked program.
///
/// # Arguments
///
/// * `config`  - Supplies the entry label.
/// * `layout`  - Section placement from [`plan`].
/// * `symbols` - Relocated symbol table.
/// * `globals` - `.global` declarations with their lines.
/// * `image`   - Encoded sections from pass 2.
///
/// # Errors
///
/// Returns [`CompileErrorKind::UndefinedSymbol`] at the declaring line for the
/// first `.global` name that was never defined.
pub fn link(
    config: &Config,
    layout: Layout,
    symbols: SymbolTable,
    globals: &[(String, usize)],
    image: Image,
) -> Result<Program, CompileError> {
    if let Some((name, line)) = globals.iter().find(|(name, _)| !symbols.contains(name)) {
        return Err(CompileError::new(
            *line,
            CompileErrorKind::UndefinedSymbol(name.clone()),
        ));
    }

    let start_address = symbols
        .get(&config.assembler.entry_label)
        .filter(|sym| sym.kind == SymbolKind::Text)
        .map_or(layout.text_origin, |sym| sym.value as u32);

    Ok(Program {
        code: image.code,
        data: image.data,
        code_origin: layout.text_origin,
        data_origin: layout.data_origin,
        start_address,
        symbols,
        listing: image.listing,
    })
}
