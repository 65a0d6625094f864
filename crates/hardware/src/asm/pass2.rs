//! Assembler Pass 2: Encoding.
//!
//! Re-walks the statements recorded by pass 1, now that every symbol has its
//! final address, and produces the section images:
//! 1. **Instructions:** Operands are resolved and encoded into words at their text offsets.
//! 2. **Data:** `.word`/`.hword`/`.byte` values are evaluated, range-checked, and stored little-endian.
//! 3. **Listing:** Every instruction word is recorded with its address and source line.

use super::mnemonic;
use super::operand;
use super::pass1::{ItemKind, Pass1, Section};
use crate::common::constants::{NOP_INSTRUCTION, WORD_SIZE};
use crate::common::error::CompileError;
use crate::sim::linker::Layout;
use crate::sim::program::ListingEntry;

/// Encoded section contents, ready to link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    /// Text section bytes.
    pub code: Vec<u8>,
    /// Data section bytes.
    pub data: Vec<u8>,
    /// One entry per instruction word.
    pub listing: Vec<ListingEntry>,
}

/// Runs pass 2.
///
/// `first.symbols` must already be relocated onto `layout`.
///
/// # Errors
///
/// Returns the first [`CompileError`]: undefined symbols, malformed operands,
/// or out-of-range values.
pub fn run(first: &Pass1<'_>, layout: &Layout) -> Result<Image, CompileError> {
    let mut image = Image {
        code: vec![0; layout.text_size as usize],
        data: vec![0; layout.data_size as usize],
        listing: Vec::with_capacity(layout.text_size as usize / WORD_SIZE as usize),
    };
    let symbols = &first.symbols;
    let lookup = |name: &str| symbols.value(name);

    for item in &first.items {
        let start = item.offset as usize;
        let err = |kind| CompileError::new(item.line, kind);
        match (&item.kind, item.section) {
            (ItemKind::Instruction { mnemonic, form, operands }, _) => {
                let pc = layout.text_origin + item.offset;
                let words = mnemonic::encode(mnemonic, *form, operands, pc, &lookup).map_err(err)?;
                for (i, word) in words.into_iter().enumerate() {
                    let at = start + i * WORD_SIZE as usize;
                    image.code[at..at + 4].copy_from_slice(&word.to_le_bytes());
                    image.listing.push(ListingEntry {
                        address: pc + (i as u32) * WORD_SIZE,
                        word,
                        line: item.line,
                    });
                }
            }
            (ItemKind::Nops(count), _) => {
                for i in 0..*count as usize {
                    let at = start + i * WORD_SIZE as usize;
                    image.code[at..at + 4].copy_from_slice(&NOP_INSTRUCTION.to_le_bytes());
                    image.listing.push(ListingEntry {
                        address: layout.text_origin + (at as u32),
                        word: NOP_INSTRUCTION,
                        line: item.line,
                    });
                }
            }
            (ItemKind::Values { width, exprs }, section) => {
                let size = width.size() as usize;
                let buf = section_buffer(&mut image, section);
                for (i, expr) in exprs.iter().enumerate() {
                    let value = operand::checked_value(expr, width.range(), &lookup).map_err(err)?;
                    let bytes = (value as u32).to_le_bytes();
                    let at = start + i * size;
                    buf[at..at + size].copy_from_slice(&bytes[..size]);
                }
            }
            (ItemKind::Bytes(bytes), section) => {
                section_buffer(&mut image, section)[start..start + bytes.len()]
                    .copy_from_slice(bytes);
            }
            (ItemKind::Fill { len, byte }, section) => {
                section_buffer(&mut image, section)[start..start + *len as usize].fill(*byte);
            }
        }
    }
    Ok(image)
}

fn section_buffer(image: &mut Image, section: Section) -> &mut Vec<u8> {
    match section {
        Section::Text => &mut image.code,
        Section::Data => &mut image.data,
    }
}
