//! Instruction Disassembler for Nios II.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for listings, instruction traces, and test diagnostics.
//!
//! Branch offsets are printed relative to the following instruction, exactly
//! as encoded; J-type targets are printed as the byte address within the
//! current 256 MiB region.
//!
//! # Usage
//!
//! ```
//! use niosim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0080_0144), "addi r2, zero, 5");
//! ```

use crate::common::constants::NOP_INSTRUCTION;
use crate::isa::abi::{self, REG_RA};
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::{self as op, opx};

/// Disassembles a 32-bit Nios II instruction into a human-readable string.
///
/// Returns a mnemonic like `"add r3, r2, r2"` or `"unknown"` for
/// unrecognised encodings. The all-zero halt sentinel prints as `"halt"`.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    if inst == crate::common::HALT_SENTINEL {
        return "halt".to_string();
    }
    if inst == NOP_INSTRUCTION {
        return "nop".to_string();
    }
    let d = decode(inst, 0);
    let (a, b) = (abi::name(d.a), abi::name(d.b));

    match d.op {
        op::CALL => format!("call {:#x}", d.imm26 << 2),
        op::JMPI => format!("jmpi {:#x}", d.imm26 << 2),
        op::R_TYPE => disasm_r_type(&d),

        op::ADDI | op::MULI | op::CMPEQI | op::CMPNEI | op::CMPLTI | op::CMPGEI => {
            format!("{} {b}, {a}, {}", i_type_name(d.op), d.simm)
        }
        op::ANDI | op::ORI | op::XORI | op::ANDHI | op::ORHI | op::XORHI | op::CMPLTUI
        | op::CMPGEUI => format!("{} {b}, {a}, {:#x}", i_type_name(d.op), d.uimm),

        op::LDW | op::LDH | op::LDHU | op::LDB | op::LDBU | op::STW | op::STH | op::STB => {
            format!("{} {b}, {}({a})", i_type_name(d.op), d.simm)
        }

        op::BR => format!("br {}", d.simm),
        op::BEQ | op::BNE | op::BLT | op::BGE | op::BLTU | op::BGEU => {
            format!("{} {a}, {b}, {}", i_type_name(d.op), d.simm)
        }

        _ => "unknown".to_string(),
    }
}

/// Mnemonic for an I-type primary opcode.
fn i_type_name(code: u32) -> &'static str {
    match code {
        op::ADDI => "addi",
        op::ANDI => "andi",
        op::ORI => "ori",
        op::XORI => "xori",
        op::ANDHI => "andhi",
        op::ORHI => "orhi",
        op::XORHI => "xorhi",
        op::MULI => "muli",
        op::CMPEQI => "cmpeqi",
        op::CMPNEI => "cmpnei",
        op::CMPLTI => "cmplti",
        op::CMPGEI => "cmpgei",
        op::CMPLTUI => "cmpltui",
        op::CMPGEUI => "cmpgeui",
        op::LDW => "ldw",
        op::LDH => "ldh",
        op::LDHU => "ldhu",
        op::LDB => "ldb",
        op::LDBU => "ldbu",
        op::STW => "stw",
        op::STH => "sth",
        op::STB => "stb",
        op::BEQ => "beq",
        op::BNE => "bne",
        op::BLT => "blt",
        op::BGE => "bge",
        op::BLTU => "bltu",
        op::BGEU => "bgeu",
        _ => "i??",
    }
}

fn disasm_r_type(d: &Decoded) -> String {
    let (a, b, c) = (abi::name(d.a), abi::name(d.b), abi::name(d.c));
    let mn = match d.opx {
        opx::ADD => "add",
        opx::SUB => "sub",
        opx::MUL => "mul",
        opx::DIV => "div",
        opx::DIVU => "divu",
        opx::AND => "and",
        opx::OR => "or",
        opx::XOR => "xor",
        opx::NOR => "nor",
        opx::SLL => "sll",
        opx::SRL => "srl",
        opx::SRA => "sra",
        opx::ROL => "rol",
        opx::ROR => "ror",
        opx::CMPEQ => "cmpeq",
        opx::CMPNE => "cmpne",
        opx::CMPLT => "cmplt",
        opx::CMPGE => "cmpge",
        opx::CMPLTU => "cmpltu",
        opx::CMPGEU => "cmpgeu",
        opx::SLLI => return format!("slli {c}, {a}, {}", d.imm5),
        opx::SRLI => return format!("srli {c}, {a}, {}", d.imm5),
        opx::SRAI => return format!("srai {c}, {a}, {}", d.imm5),
        opx::ROLI => return format!("roli {c}, {a}, {}", d.imm5),
        opx::JMP => return format!("jmp {a}"),
        opx::RET if d.a == REG_RA => return "ret".to_string(),
        opx::RET => return format!("ret {a}"),
        opx::CALLR => return format!("callr {a}"),
        opx::NEXTPC => return format!("nextpc {c}"),
        _ => return "unknown".to_string(),
    };
    format!("{mn} {c}, {a}, {b}")
}
