//! Configuration system for the Nios II emulator.
//!
//! This module defines all configuration structures used to parameterize the
//! assembler, linker and core. It provides:
//! 1. **Defaults:** Baseline constants (memory size, origin, entry label, step limit).
//! 2. **Structures:** Hierarchical config for general, memory, and assembler settings.
//! 3. **Loading:** JSON parsing from text or file, followed by validation.
//!
//! Every field has a default, so `{}` is a complete configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::constants::{WORD_ALIGN_MASK, WORD_SIZE};

/// Default configuration constants for the emulator.
mod defaults {
    /// Total size of main memory (64 KiB).
    pub const MEMORY_SIZE: usize = 64 * 1024;

    /// Address where the text section is placed.
    pub const PROGRAM_START: u32 = 0x0000_0000;

    /// Label used as the entry point when it is defined in `.text`.
    pub const ENTRY_LABEL: &str = "_start";

    /// Steps a host should execute before giving up on a run.
    pub const STEP_LIMIT: u64 = 10_000_000;
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON for the configuration schema.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an impossible layout.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration for the emulator.
///
/// # Examples
///
/// ```
/// use niosim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "memory": { "size": 4096, "data_offset": 2048 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.size, 4096);
/// assert_eq!(config.memory.data_offset, Some(2048));
/// assert_eq!(config.assembler.entry_label, "_start");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General emulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory size and program layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Assembler options
    #[serde(default)]
    pub assembler: AssemblerConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if [`Config::validate`] rejects the result.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that the memory layout is usable.
    ///
    /// The memory size must be a non-zero multiple of 4 addressable with
    /// 32 bits; the program origin and data offset must be word-aligned and
    /// inside memory; the entry label must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mem = &self.memory;
        if mem.size == 0 || mem.size % WORD_SIZE as usize != 0 {
            return Err(ConfigError::Invalid(format!(
                "memory.size {} must be a non-zero multiple of {WORD_SIZE}",
                mem.size
            )));
        }
        if mem.size as u64 > 1 << 32 {
            return Err(ConfigError::Invalid(format!(
                "memory.size {} exceeds the 32-bit address space",
                mem.size
            )));
        }
        if mem.program_start & WORD_ALIGN_MASK != 0 {
            return Err(ConfigError::Invalid(format!(
                "memory.program_start {:#x} is not word-aligned",
                mem.program_start
            )));
        }
        if mem.program_start as usize >= mem.size {
            return Err(ConfigError::Invalid(format!(
                "memory.program_start {:#x} lies outside {} bytes of memory",
                mem.program_start, mem.size
            )));
        }
        if let Some(offset) = mem.data_offset {
            if offset & WORD_ALIGN_MASK != 0 {
                return Err(ConfigError::Invalid(format!(
                    "memory.data_offset {offset:#x} is not word-aligned"
                )));
            }
            if mem.program_start as u64 + offset as u64 > mem.size as u64 {
                return Err(ConfigError::Invalid(format!(
                    "memory.data_offset {offset:#x} lies outside {} bytes of memory",
                    mem.size
                )));
            }
        }
        if self.assembler.entry_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "assembler.entry_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// General emulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event with the disassembly of every retired instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Steps a host should run before stopping; `null` means no limit
    #[serde(default = "GeneralConfig::default_step_limit")]
    pub step_limit: Option<u64>,
}

impl GeneralConfig {
    /// Returns the default step limit.
    fn default_step_limit() -> Option<u64> {
        Some(defaults::STEP_LIMIT)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            step_limit: Self::default_step_limit(),
        }
    }
}

/// Memory size and program placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Address of the first instruction of the text section
    #[serde(default = "MemoryConfig::default_program_start")]
    pub program_start: u32,

    /// Fixed offset of the data section from `program_start`.
    /// When absent, data follows the code and the halt word.
    #[serde(default)]
    pub data_offset: Option<u32>,
}

impl MemoryConfig {
    /// Returns the default memory size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default program origin.
    fn default_program_start() -> u32 {
        defaults::PROGRAM_START
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            program_start: defaults::PROGRAM_START,
            data_offset: None,
        }
    }
}

/// Assembler options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssemblerConfig {
    /// Label whose address becomes the start address
    #[serde(default = "AssemblerConfig::default_entry_label")]
    pub entry_label: String,
}

impl AssemblerConfig {
    /// Returns the default entry label.
    fn default_entry_label() -> String {
        defaults::ENTRY_LABEL.to_string()
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            entry_label: Self::default_entry_label(),
        }
    }
}
