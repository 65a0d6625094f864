//! Emulated system resources outside the core.
//!
//! The Nios II teaching target has a single flat memory; there are no
//! devices or interconnect to model.

/// Flat byte-addressable main memory.
pub mod memory;

pub use memory::{Memory, MemoryError};
