//! Emulator session and program linking.
//!
//! Provides the linker that lays assembled sections out in memory, the
//! immutable [`Program`] it emits, and the [`Emulator`] context that compiles,
//! runs, and reports on programs.

/// Execution context driving compile, step, run, and reset.
pub mod emulator;
/// Section layout and program emission.
pub mod linker;
/// State-change notifications for hosts.
pub mod observer;
/// The linked program image.
pub mod program;

pub use emulator::{Emulator, MachineSnapshot, RunExit, RunState};
pub use observer::EmulatorObserver;
pub use program::Program;
