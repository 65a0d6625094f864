//! Byte-Addressable Main Memory.
//!
//! This module provides the flat memory the core executes from. It provides:
//! 1. **Fixed Storage:** A zero-initialised byte buffer whose size never changes.
//! 2. **Checked Access:** Byte, half-word and word reads/writes with bounds and alignment checks.
//! 3. **Program Loading:** Placement of linked code and data at their fixed origins.
//!
//! Multi-byte values are little-endian. Every check happens before any byte is
//! mutated, so a rejected access leaves memory untouched.

use thiserror::Error;

use crate::common::constants::{HALF_SIZE, WORD_SIZE};
use crate::sim::program::Program;

/// Error raised by a rejected memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Some byte of the access lies beyond the end of memory.
    #[error("address {address:#010x} out of bounds")]
    OutOfBounds {
        /// First address of the access.
        address: u32,
    },

    /// The address is not a multiple of the access size.
    #[error("address {address:#010x} misaligned")]
    Misaligned {
        /// The unaligned address.
        address: u32,
    },
}

/// Flat, fixed-size, byte-addressable memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Creates a memory of `size` bytes holding the program's code and data.
    ///
    /// Code is copied to the program origin and data to the data origin; all
    /// other bytes are zero.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if either segment does not fit.
    pub fn with_program(size: usize, program: &Program) -> Result<Self, MemoryError> {
        let mut memory = Self::new(size);
        memory.load(program.code_origin, &program.code)?;
        memory.load(program.data_origin, &program.data)?;
        Ok(memory)
    }

    /// Returns the size of memory in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if memory has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a read-only view of the whole memory.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `data` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the block does not fit; memory is unchanged.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        if data.is_empty() {
            return Ok(());
        }
        let start = self.span(addr, data.len())?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if `addr` is outside memory.
    pub fn read_byte(&self, addr: u32) -> Result<u8, MemoryError> {
        let start = self.span(addr, 1)?;
        Ok(self.bytes[start])
    }

    /// Reads a little-endian half-word.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Misaligned`] if `addr` is odd, or
    /// [`MemoryError::OutOfBounds`] if either byte is outside memory.
    pub fn read_half(&self, addr: u32) -> Result<u16, MemoryError> {
        let start = self.aligned_span(addr, HALF_SIZE)?;
        Ok(u16::from_le_bytes([self.bytes[start], self.bytes[start + 1]]))
    }

    /// Reads a little-endian word.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Misaligned`] if `addr % 4 != 0`, or
    /// [`MemoryError::OutOfBounds`] if `addr + 3` is outside memory.
    pub fn read_word(&self, addr: u32) -> Result<u32, MemoryError> {
        let start = self.aligned_span(addr, WORD_SIZE)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[start..start + 4]);
        Ok(u32::from_le_bytes(word))
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if `addr` is outside memory.
    pub fn write_byte(&mut self, addr: u32, value: u8) -> Result<(), MemoryError> {
        let start = self.span(addr, 1)?;
        self.bytes[start] = value;
        Ok(())
    }

    /// Writes a little-endian half-word.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Memory::read_half`]; memory is unchanged on error.
    pub fn write_half(&mut self, addr: u32, value: u16) -> Result<(), MemoryError> {
        let start = self.aligned_span(addr, HALF_SIZE)?;
        self.bytes[start..start + 2].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a little-endian word.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Memory::read_word`]; memory is unchanged on error.
    pub fn write_word(&mut self, addr: u32, value: u32) -> Result<(), MemoryError> {
        let start = self.aligned_span(addr, WORD_SIZE)?;
        self.bytes[start..start + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Checks alignment, then bounds, returning the start index.
    fn aligned_span(&self, addr: u32, size: u32) -> Result<usize, MemoryError> {
        if addr % size != 0 {
            return Err(MemoryError::Misaligned { address: addr });
        }
        self.span(addr, size as usize)
    }

    /// Checks that `len` bytes starting at `addr` lie inside memory.
    fn span(&self, addr: u32, len: usize) -> Result<usize, MemoryError> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(start),
            _ => Err(MemoryError::OutOfBounds { address: addr }),
        }
    }
}
