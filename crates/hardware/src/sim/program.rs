//! Linked Program Image.
//!
//! A [`Program`] is the immutable result of one successful compile: code and
//! data bytes at fixed origins, the start address, the final symbol table, and
//! a listing that maps every instruction word back to its source line.

use serde::Serialize;

use crate::asm::symbols::SymbolTable;

/// One assembled instruction word and where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// Absolute address of the word.
    pub address: u32,
    /// The encoded instruction.
    pub word: u32,
    /// 1-based source line that produced it.
    pub line: usize,
}

/// A fully linked, relocation-free program image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    /// Encoded text section (little-endian words).
    pub code: Vec<u8>,
    /// Initialised data section.
    pub data: Vec<u8>,
    /// Address of the first code byte.
    pub code_origin: u32,
    /// Address of the first data byte.
    pub data_origin: u32,
    /// Address execution starts from.
    pub start_address: u32,
    /// Final symbol values.
    pub symbols: SymbolTable,
    /// One entry per instruction word, in address order.
    pub listing: Vec<ListingEntry>,
}

impl Program {
    /// Returns the code as instruction words in address order.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.code
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
    }

    /// Returns the number of instruction words.
    pub fn instruction_count(&self) -> usize {
        self.code.len() / 4
    }

    /// Address one past the last code byte.
    pub fn code_end(&self) -> u32 {
        self.code_origin + self.code.len() as u32
    }

    /// Address one past the last data byte.
    pub fn data_end(&self) -> u32 {
        self.data_origin + self.data.len() as u32
    }

    /// Looks up the final address or value of a symbol.
    pub fn symbol(&self, name: &str) -> Option<i64> {
        self.symbols.value(name)
    }
}
