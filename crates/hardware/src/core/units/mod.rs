//! Execution units and functional components.
//!
//! This module contains the functional units the instruction handlers are
//! built from: the integer ALU, the branch resolution unit, and the
//! load/store unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit for conditions and control-flow targets.
pub mod bru;

/// Load/Store Unit for sized memory accesses.
pub mod lsu;
