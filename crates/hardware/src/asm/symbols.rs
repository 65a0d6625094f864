//! Assembler Symbol Table.
//!
//! This module maps symbol names to values. It provides:
//! 1. **Definition:** Labels and `.equ` constants are added during pass 1; names are unique.
//! 2. **Relocation:** Section-relative labels are rebased onto the linker's layout once.
//! 3. **Lookup:** Pass 2 and the linker read final values; the table is not modified after relocation.
//!
//! Names are case-sensitive. Iteration order is by name, so listings and
//! serialized programs are deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

/// Which address space a symbol's value is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// A label in the text section.
    Text,
    /// A label in the data section.
    Data,
    /// A constant defined with `.equ`.
    Absolute,
}

/// One symbol definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Address space of `value`.
    pub kind: SymbolKind,
    /// Section offset before relocation, absolute address or constant after.
    pub value: i64,
    /// 1-based line of the definition.
    pub line: usize,
}

/// Map from symbol name to its definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol.
    ///
    /// # Returns
    ///
    /// `false` (leaving the table unchanged) if the name is already defined.
    pub fn define(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        let _ = self.entries.insert(name.to_string(), symbol);
        true
    }

    /// Returns `true` if the name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the full definition of a symbol.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    /// Returns the value of a symbol.
    pub fn value(&self, name: &str) -> Option<i64> {
        self.entries.get(name).map(|s| s.value)
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no symbols are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all symbols in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.entries.iter().map(|(name, sym)| (name.as_str(), sym))
    }

    /// Rebases text and data labels onto their section origins.
    ///
    /// Must be called exactly once, after pass 1 and before any lookup that
    /// expects final addresses.
    pub fn relocate(&mut self, text_origin: u32, data_origin: u32) {
        for sym in self.entries.values_mut() {
            match sym.kind {
                SymbolKind::Text => sym.value += i64::from(text_origin),
                SymbolKind::Data => sym.value += i64::from(data_origin),
                SymbolKind::Absolute => {}
            }
        }
    }
}
