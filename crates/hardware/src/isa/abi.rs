//! Nios II Application Binary Interface (ABI) register names.
//!
//! Defines the register index constants and the name table used by the
//! assembler (parsing) and the disassembler and snapshots (printing).

/// Register r0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register r1 (assembler temporary, at).
pub const REG_AT: usize = 1;
/// Register r24 (exception temporary, et).
pub const REG_ET: usize = 24;
/// Register r25 (breakpoint temporary, bt).
pub const REG_BT: usize = 25;
/// Register r26 (global pointer, gp).
pub const REG_GP: usize = 26;
/// Register r27 (stack pointer, sp).
pub const REG_SP: usize = 27;
/// Register r28 (frame pointer, fp).
pub const REG_FP: usize = 28;
/// Register r29 (exception return address, ea).
pub const REG_EA: usize = 29;
/// Register r30 (breakpoint return address, ba).
pub const REG_BA: usize = 30;
/// Register r31 (return address, ra).
pub const REG_RA: usize = 31;

/// Registers reserved for exception and debug handling, which the emulator does not model.
pub const UNMODELLED: [usize; 4] = [REG_ET, REG_BT, REG_EA, REG_BA];

/// Canonical names for r0–r31.
const REG_NAMES: [&str; 32] = [
    "zero", "at", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13",
    "r14", "r15", "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23", "et", "bt", "gp", "sp",
    "fp", "ea", "ba", "ra",
];

/// Returns the canonical name of a register index, or `"r??"` if out of range.
pub fn name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("r??")
}

/// Parses a register name (`r0`..`r31` or an alias), case-insensitively.
pub fn parse(name: &str) -> Option<usize> {
    let lower = name.to_ascii_lowercase();
    if let Some(digits) = lower.strip_prefix('r') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits.parse::<usize>().ok().filter(|idx| *idx < REG_NAMES.len());
        }
    }
    REG_NAMES.iter().position(|candidate| *candidate == lower)
}
