use niosim_core::common::CompileError;
use niosim_core::config::Config;
use niosim_core::sim::{Emulator, Program};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly `tracing` subscriber once per process.
///
/// Filtering follows `RUST_LOG`; output goes through the test writer so it is
/// captured per test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assembles `source` with the default configuration.
pub fn assemble(source: &str) -> Result<Program, CompileError> {
    init_tracing();
    let config = Config::default();
    niosim_core::asm::Assembler::new(&config).assemble(source)
}

/// Assembles `source` and returns its instruction words.
pub fn words(source: &str) -> Vec<u32> {
    assemble(source).unwrap().words().collect()
}

/// Assembles `source` and returns the error it is expected to produce.
pub fn compile_error(source: &str) -> CompileError {
    assemble(source).unwrap_err()
}

pub struct TestContext {
    pub emu: Emulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        Self {
            emu: Emulator::new(config).unwrap(),
        }
    }

    /// Compiles `source`, panicking on a compile error.
    pub fn compile(mut self, source: &str) -> Self {
        let _ = self.emu.compile(source).unwrap();
        self
    }

    /// Runs to the halt word, panicking on a fault. Returns the retired count.
    pub fn run(&mut self) -> u64 {
        self.emu.run().unwrap()
    }

    /// Read a general-purpose register value without touching its tag.
    pub fn reg(&self, idx: usize) -> u32 {
        self.emu.registers().peek(idx)
    }

    /// Read a word from memory.
    pub fn word(&self, addr: u32) -> u32 {
        self.emu.memory().read_word(addr).unwrap()
    }

    /// Read a byte from memory.
    pub fn byte(&self, addr: u32) -> u8 {
        self.emu.memory().read_byte(addr).unwrap()
    }

    /// Final address of a symbol in the loaded program.
    pub fn symbol(&self, name: &str) -> u32 {
        self.emu.program().unwrap().symbol(name).unwrap() as u32
    }

    pub fn pc(&self) -> u32 {
        self.emu.read_pc()
    }
}
