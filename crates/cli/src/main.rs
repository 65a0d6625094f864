//! Nios II teaching emulator CLI.
//!
//! This binary is a thin host over the emulator library. It performs:
//! 1. **Run:** Assemble a source file, run it to the halt word, and print the final machine state.
//! 2. **Assemble:** Print the listing (address, word, disassembly) and the symbol table.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use niosim_core::config::Config;
use niosim_core::isa::disasm::disassemble;
use niosim_core::sim::{Emulator, MachineSnapshot, Program, RunExit};

#[derive(Parser, Debug)]
#[command(
    name = "niosim",
    author,
    version,
    about = "Nios II teaching emulator",
    long_about = "Assemble and run Nios II assembly programs.\n\nExamples:\n  niosim run -f prog.s\n  niosim run -f prog.s --config niosim.json --trace\n  niosim asm -f prog.s"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and run a program until it halts or faults.
    Run {
        /// Assembly source file.
        #[arg(short, long)]
        file: String,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<String>,

        /// Trace every retired instruction (sets `general.trace_instructions`).
        #[arg(long)]
        trace: bool,

        /// Stop after this many instructions (overrides `general.step_limit`).
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print the final state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Assemble a program and print its listing and symbols.
    Asm {
        /// Assembly source file.
        #[arg(short, long)]
        file: String,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<String>,

        /// Print the linked program as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RunReport {
    exit: RunExit,
    machine: MachineSnapshot,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            trace,
            max_steps,
            json,
        } => cmd_run(&file, config.as_deref(), trace, max_steps, json),
        Commands::Asm { file, config, json } => cmd_asm(&file, config.as_deref(), json),
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` overrides the default filter.
fn init_logging(trace: bool) {
    let default = if trace { "niosim_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Config {
    match path {
        Some(p) => Config::from_file(p).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(2);
        }),
        None => Config::default(),
    }
}

fn new_emulator(config: Config) -> Emulator {
    Emulator::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(2);
    })
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {path}: {e}");
        process::exit(2);
    })
}

/// Assembles `file`, runs it, and prints registers and statistics.
///
/// Exits with code 1 on a compile error or fault.
fn cmd_run(file: &str, config: Option<&str>, trace: bool, max_steps: Option<u64>, json: bool) {
    let mut config = load_config(config);
    config.general.trace_instructions |= trace;
    if max_steps.is_some() {
        config.general.step_limit = max_steps;
    }
    init_logging(config.general.trace_instructions);

    let source = read_source(file);
    let mut emu = new_emulator(config);
    if let Err(e) = emu.compile(&source) {
        eprintln!("{file}:{e}");
        process::exit(1);
    }

    let exit = match emu.run_limited() {
        Ok(exit) => exit,
        Err(fault) => {
            eprintln!("\n[!] FAULT: {fault}");
            emu.cpu().dump_state();
            emu.stats().print();
            process::exit(1);
        }
    };

    if json {
        let report = RunReport {
            exit,
            machine: emu.snapshot(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if exit == RunExit::StepLimit {
        println!("[*] Step limit reached at pc {:#010x}", emu.read_pc());
    } else {
        println!("[*] Halted at pc {:#010x}", emu.read_pc());
    }
    emu.cpu().dump_state();
    emu.stats().print();
}

/// Assembles `file` and prints its listing and symbol table.
fn cmd_asm(file: &str, config: Option<&str>, json: bool) {
    let config = load_config(config);
    init_logging(false);

    let source = read_source(file);
    let mut emu = new_emulator(config);
    let program = match emu.compile(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{file}:{e}");
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(program.as_ref()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }
    print_listing(&program, &source);
}

fn print_listing(program: &Program, source: &str) {
    let lines: Vec<&str> = source.lines().collect();
    for entry in &program.listing {
        let text = lines.get(entry.line - 1).map_or("", |l| l.trim());
        println!(
            "{:08x}  {:08x}  {:<28} {:>5}: {}",
            entry.address,
            entry.word,
            disassemble(entry.word),
            entry.line,
            text
        );
    }
    println!(
        "{:08x}  {:08x}  {:<28}",
        program.code_end(),
        0,
        "halt"
    );
    if !program.data.is_empty() {
        println!(
            "\ndata: {} bytes at {:#010x}",
            program.data.len(),
            program.data_origin
        );
    }
    println!("\nentry: {:#010x}", program.start_address);
    println!("\nSYMBOLS");
    for (name, sym) in program.symbols.iter() {
        println!("  {:<24} {:#010x}  {:?}", name, sym.value, sym.kind);
    }
}
