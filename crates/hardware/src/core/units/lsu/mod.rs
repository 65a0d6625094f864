//! Load/Store Unit (LSU).
//!
//! Performs sized memory accesses on behalf of the load and store handlers.
//! Byte and half-word loads are zero- or sign-extended to 32 bits; stores
//! truncate the register value to the access width.

use crate::soc::memory::{Memory, MemoryError};

/// Width of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// One byte.
    Byte,
    /// Two bytes, 2-byte aligned.
    Half,
    /// Four bytes, 4-byte aligned.
    Word,
}

/// Load/Store Unit.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Computes an effective address `base + offset` with wrap-around.
    pub const fn effective_address(base: u32, offset: i32) -> u32 {
        base.wrapping_add(offset as u32)
    }

    /// Loads a value of `width` bytes, extending it to 32 bits.
    ///
    /// # Arguments
    ///
    /// * `mem`    - Memory to read.
    /// * `addr`   - Effective address.
    /// * `width`  - Access width.
    /// * `signed` - Sign-extend (`true`) or zero-extend (`false`) narrow loads.
    ///
    /// # Errors
    ///
    /// Propagates the [`MemoryError`] of the underlying access.
    pub fn load(
        mem: &Memory,
        addr: u32,
        width: MemWidth,
        signed: bool,
    ) -> Result<u32, MemoryError> {
        let value = match width {
            MemWidth::Byte => {
                let b = mem.read_byte(addr)?;
                if signed {
                    b as i8 as i32 as u32
                } else {
                    u32::from(b)
                }
            }
            MemWidth::Half => {
                let h = mem.read_half(addr)?;
                if signed {
                    h as i16 as i32 as u32
                } else {
                    u32::from(h)
                }
            }
            MemWidth::Word => mem.read_word(addr)?,
        };
        Ok(value)
    }

    /// Stores the low `width` bytes of `value`.
    ///
    /// # Errors
    ///
    /// Propagates the [`MemoryError`] of the underlying access; memory is unchanged.
    pub fn store(
        mem: &mut Memory,
        addr: u32,
        width: MemWidth,
        value: u32,
    ) -> Result<(), MemoryError> {
        match width {
            MemWidth::Byte => mem.write_byte(addr, value as u8),
            MemWidth::Half => mem.write_half(addr, value as u16),
            MemWidth::Word => mem.write_word(addr, value),
        }
    }
}
