//! Nios II General-Purpose Register File.
//!
//! This module implements the general-purpose register file. It performs the following:
//! 1. **Storage:** Maintains a fixed number of 32-bit registers (`r0`-`r31` on Nios II).
//! 2. **Invariant Enforcement:** Ensures that register `r0` is hardwired to zero.
//! 3. **Observability:** Tags every register with the kind of its latest access
//!    during the current step, for external viewers.

use serde::Serialize;

use crate::isa::abi;

/// Access state of a register during the current step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessState {
    /// Not touched since the last tag reset.
    #[default]
    None,
    /// Read by the current instruction.
    Read,
    /// Written by the current instruction.
    Write,
    /// Not modelled by the emulator; the tag never changes.
    Disabled,
}

/// Owned copy of one register for external viewers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    /// Register index.
    pub index: usize,
    /// Canonical assembler name (`zero`, `r2`, `sp`, ...).
    pub name: &'static str,
    /// Current value.
    pub value: u32,
    /// Access state at the end of the last step.
    pub state: AccessState,
}

/// General-purpose register file with per-register access tags.
///
/// Register `r0` always reads as zero. Writes to it are accepted: the value stays
/// zero but the tag still records the write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    values: Vec<u32>,
    tags: Vec<AccessState>,
}

impl RegisterFile {
    /// Creates a register file of `count` zeroed registers.
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![0; count],
            tags: vec![AccessState::None; count],
        }
    }

    /// Creates the Nios II register file: 32 registers with the exception and
    /// debug registers (`et`, `bt`, `ea`, `ba`) disabled.
    pub fn nios2() -> Self {
        let mut regs = Self::new(crate::common::REGISTER_COUNT);
        for idx in abi::UNMODELLED {
            regs.disable(idx);
        }
        regs
    }

    /// Returns the number of registers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the file has no registers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Marks a register as not modelled. Its tag stays [`AccessState::Disabled`].
    pub fn disable(&mut self, idx: usize) {
        if let Some(tag) = self.tags.get_mut(idx) {
            *tag = AccessState::Disabled;
        }
    }

    /// Reads a register and records the read.
    ///
    /// A register already written during this step keeps its `Write` tag.
    /// Out-of-range indices read as zero.
    pub fn read(&mut self, idx: usize) -> u32 {
        if let Some(tag) = self.tags.get_mut(idx) {
            if *tag == AccessState::None {
                *tag = AccessState::Read;
            }
        }
        self.peek(idx)
    }

    /// Writes a register and records the write. Writes to `r0` only update the tag.
    pub fn write(&mut self, idx: usize, value: u32) {
        if let Some(tag) = self.tags.get_mut(idx) {
            if *tag != AccessState::Disabled {
                *tag = AccessState::Write;
            }
        }
        if idx != abi::REG_ZERO {
            if let Some(slot) = self.values.get_mut(idx) {
                *slot = value;
            }
        }
    }

    /// Returns a register value without touching its tag.
    pub fn peek(&self, idx: usize) -> u32 {
        if idx == abi::REG_ZERO {
            0
        } else {
            self.values.get(idx).copied().unwrap_or(0)
        }
    }

    /// Returns the access tag of a register.
    pub fn state(&self, idx: usize) -> AccessState {
        self.tags.get(idx).copied().unwrap_or(AccessState::None)
    }

    /// Clears every tag back to [`AccessState::None`], leaving disabled registers alone.
    pub fn reset_access_tags(&mut self) {
        for tag in &mut self.tags {
            if *tag != AccessState::Disabled {
                *tag = AccessState::None;
            }
        }
    }

    /// Zeroes every value and clears every tag. Disabled registers stay disabled.
    pub fn reset(&mut self) {
        self.values.fill(0);
        self.reset_access_tags();
    }

    /// Returns an owned copy of every register.
    pub fn snapshot(&self) -> Vec<RegisterSnapshot> {
        (0..self.len())
            .map(|index| RegisterSnapshot {
                index,
                name: abi::name(index),
                value: self.peek(index),
                state: self.state(index),
            })
            .collect()
    }

    /// Dumps the contents of all registers to stdout, four per line.
    pub fn dump(&self) {
        for row in (0..self.len()).step_by(4) {
            let line: Vec<String> = (row..(row + 4).min(self.len()))
                .map(|i| format!("{:>4}={:#010x}", abi::name(i), self.peek(i)))
                .collect();
            println!("{}", line.join("  "));
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::nios2()
    }
}
