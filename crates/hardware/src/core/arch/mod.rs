//! Nios II architectural state.
//!
//! The only architectural state besides the PC is the general-purpose register
//! file; control registers are not modelled.

/// General-purpose register file with access tags.
pub mod gpr;

pub use gpr::{AccessState, RegisterFile, RegisterSnapshot};
