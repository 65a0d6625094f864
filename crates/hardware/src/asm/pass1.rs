//! Assembler Pass 1: Classification and Layout.
//!
//! Walks the source once and performs the following:
//! 1. **Classification:** Every line becomes labels plus an optional statement.
//! 2. **Address Assignment:** Instructions and data get section-relative offsets.
//! 3. **Symbol Definition:** Labels bind to the next emitted unit; `.equ` defines constants.
//! 4. **Validation:** Unknown mnemonics, duplicate labels, misplaced statements,
//!    and malformed directives stop the pass at the first error.
//!
//! Operand expressions of instructions and data words are not evaluated here;
//! they may reference labels defined further down.

use tracing::debug;

use super::expr::{Expr, parse_expr};
use super::mnemonic::{self, Form};
use super::operand::{self, ImmRange};
use super::source::{self, Statement, is_identifier};
use super::symbols::{Symbol, SymbolKind, SymbolTable};
use crate::common::constants::WORD_SIZE;
use crate::common::error::{CompileError, CompileErrorKind};
use crate::sim::linker::SegmentSummary;

/// Largest accepted `.align` exponent.
const MAX_ALIGN_POWER: i64 = 16;

/// Output section of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// Instructions.
    Text,
    /// Initialised data.
    Data,
}

/// Element width of a data directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataWidth {
    /// `.byte`
    Byte,
    /// `.hword` / `.short`
    Half,
    /// `.word`
    Word,
}

impl DataWidth {
    /// Size of one element in bytes.
    pub const fn size(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }

    /// Range accepted for one element.
    pub const fn range(self) -> ImmRange {
        match self {
            Self::Byte => ImmRange::Byte,
            Self::Half => ImmRange::Half,
            Self::Word => ImmRange::Word,
        }
    }
}

/// What an item emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind<'a> {
    /// One instruction (one or two words).
    Instruction {
        /// Lower-case mnemonic.
        mnemonic: String,
        /// Operand form.
        form: Form,
        /// Operand texts.
        operands: Vec<&'a str>,
    },
    /// Data elements evaluated in pass 2.
    Values {
        /// Element width.
        width: DataWidth,
        /// One expression per element.
        exprs: Vec<Expr>,
    },
    /// Literal bytes (strings).
    Bytes(Vec<u8>),
    /// `len` copies of `byte` (`.skip`, data alignment padding).
    Fill {
        /// Number of bytes.
        len: u32,
        /// Fill value.
        byte: u8,
    },
    /// Text alignment padding, in `nop` words.
    Nops(u32),
}

/// One emitting statement with its section-relative placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<'a> {
    /// 1-based source line.
    pub line: usize,
    /// Target section.
    pub section: Section,
    /// Offset from the section origin.
    pub offset: u32,
    /// Payload.
    pub kind: ItemKind<'a>,
}

/// Everything pass 1 learns about the program.
#[derive(Clone, Debug, Default)]
pub struct Pass1<'a> {
    /// Emitting statements in source order.
    pub items: Vec<Item<'a>>,
    /// Symbols; labels are section-relative until relocated.
    pub symbols: SymbolTable,
    /// Names declared with `.global`, with the declaring line.
    pub globals: Vec<(String, usize)>,
    /// Segment sizes and the lines that last emitted into them.
    pub segments: SegmentSummary,
}

/// Pass 1 state machine.
struct Scanner<'a> {
    out: Pass1<'a>,
    section: Section,
    text_offset: u32,
    data_offset: u32,
    pending: Vec<(&'a str, usize)>,
}

/// Runs pass 1 over the whole source.
///
/// # Errors
///
/// Returns the first [`CompileError`] encountered.
pub fn run(source: &str) -> Result<Pass1<'_>, CompileError> {
    let mut scanner = Scanner {
        out: Pass1::default(),
        section: Section::Text,
        text_offset: 0,
        data_offset: 0,
        pending: Vec::new(),
    };
    scanner.out.segments.data_align = WORD_SIZE;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let parsed = source::parse_line(line, raw);
        for &label in &parsed.labels {
            scanner.add_label(label, line)?;
        }
        let Some(statement) = parsed.statement else {
            continue;
        };
        let keep_going = match statement {
            Statement::Directive { name, args } => scanner.directive(&name, args, line)?,
            Statement::Instruction { mnemonic, operands } => {
                scanner.instruction(mnemonic, operands, line)?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    scanner.bind_pending(scanner.offset());
    scanner.out.segments.text_size = scanner.text_offset;
    scanner.out.segments.data_size = scanner.data_offset;
    debug!(
        text_size = scanner.text_offset,
        data_size = scanner.data_offset,
        symbols = scanner.out.symbols.len(),
        "pass 1 complete"
    );
    Ok(scanner.out)
}

impl<'a> Scanner<'a> {
    fn offset(&self) -> u32 {
        match self.section {
            Section::Text => self.text_offset,
            Section::Data => self.data_offset,
        }
    }

    fn kind(&self) -> SymbolKind {
        match self.section {
            Section::Text => SymbolKind::Text,
            Section::Data => SymbolKind::Data,
        }
    }

    fn add_label(&mut self, name: &'a str, line: usize) -> Result<(), CompileError> {
        if self.out.symbols.contains(name) || self.pending.iter().any(|(n, _)| *n == name) {
            return Err(CompileError::new(
                line,
                CompileErrorKind::DuplicateLabel(name.to_string()),
            ));
        }
        self.pending.push((name, line));
        Ok(())
    }

    /// Binds every pending label to `offset` in the current section.
    fn bind_pending(&mut self, offset: u32) {
        let kind = self.kind();
        for (name, line) in self.pending.drain(..) {
            let _ = self.out.symbols.define(
                name,
                Symbol {
                    kind,
                    value: i64::from(offset),
                    line,
                },
            );
        }
    }

    /// Records an emitting item of `size` bytes at the current offset.
    fn emit(&mut self, line: usize, size: u32, kind: ItemKind<'a>) -> Result<(), CompileError> {
        let offset = self.offset();
        let end = offset.checked_add(size).ok_or_else(|| {
            CompileError::new(
                line,
                CompileErrorKind::Layout("section exceeds the 32-bit address space".to_string()),
            )
        })?;
        match self.section {
            Section::Text => {
                self.text_offset = end;
                self.out.segments.last_text_line = line;
            }
            Section::Data => {
                self.data_offset = end;
                self.out.segments.last_data_line = line;
            }
        }
        self.out.items.push(Item {
            line,
            section: self.section,
            offset,
            kind,
        });
        Ok(())
    }

    /// Emits an item that labels attach to.
    fn emit_labelled(
        &mut self,
        line: usize,
        size: u32,
        kind: ItemKind<'a>,
    ) -> Result<(), CompileError> {
        self.bind_pending(self.offset());
        self.emit(line, size, kind)
    }

    fn instruction(
        &mut self,
        mnemonic: String,
        operands: &'a str,
        line: usize,
    ) -> Result<(), CompileError> {
        let form = mnemonic::lookup(&mnemonic).ok_or_else(|| {
            CompileError::new(line, CompileErrorKind::UnknownMnemonic(mnemonic.clone()))
        })?;
        if self.section != Section::Text {
            return Err(CompileError::new(
                line,
                CompileErrorKind::WrongSection(format!(
                    "instruction `{mnemonic}` outside .text"
                )),
            ));
        }
        let operands = source::split_operands(operands);
        self.emit_labelled(
            line,
            form.size(),
            ItemKind::Instruction {
                mnemonic,
                form,
                operands,
            },
        )
    }

    /// Handles one directive. Returns `false` on `.end`.
    fn directive(&mut self, name: &str, args: &'a str, line: usize) -> Result<bool, CompileError> {
        let err = |kind: CompileErrorKind| CompileError::new(line, kind);
        match name {
            "text" | "data" => {
                self.bind_pending(self.offset());
                self.section = if name == "text" {
                    Section::Text
                } else {
                    Section::Data
                };
            }
            "end" => return Ok(false),
            "global" | "globl" => {
                for sym in source::split_operands(args) {
                    if !is_identifier(sym) {
                        return Err(err(CompileErrorKind::MalformedDirective(format!(
                            "`.{name}` expects symbol names, found `{sym}`"
                        ))));
                    }
                    self.out.globals.push((sym.to_string(), line));
                }
                if self.out.globals.last().is_none_or(|(_, l)| *l != line) {
                    return Err(err(CompileErrorKind::MalformedDirective(format!(
                        "`.{name}` expects at least one symbol"
                    ))));
                }
            }
            "equ" => self.equ(name, args, line)?,
            "align" => {
                let [power] = self.constants::<1>(name, args, line)?;
                if !(0..=MAX_ALIGN_POWER).contains(&power) {
                    return Err(err(CompileErrorKind::MalformedDirective(format!(
                        "`.align {power}` must be between 0 and {MAX_ALIGN_POWER}"
                    ))));
                }
                self.align(1u32 << power, line)?;
            }
            "word" | "hword" | "short" | "byte" => {
                let width = match name {
                    "word" => DataWidth::Word,
                    "byte" => DataWidth::Byte,
                    _ => DataWidth::Half,
                };
                self.require_data(name, line)?;
                let exprs = source::split_operands(args)
                    .into_iter()
                    .map(|text| {
                        if text.is_empty() {
                            Err(CompileErrorKind::MalformedDirective(format!(
                                "empty value in `.{name}`"
                            )))
                        } else {
                            parse_expr(text)
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(err)?;
                if exprs.is_empty() {
                    return Err(err(CompileErrorKind::MalformedDirective(format!(
                        "`.{name}` expects at least one value"
                    ))));
                }
                let size = width.size() * exprs.len() as u32;
                self.emit_labelled(line, size, ItemKind::Values { width, exprs })?;
            }
            "ascii" | "asciz" | "string" => {
                self.require_data(name, line)?;
                let mut bytes = operand::string_literal(args).map_err(err)?;
                if name != "ascii" {
                    bytes.push(0);
                }
                self.emit_labelled(line, bytes.len() as u32, ItemKind::Bytes(bytes))?;
            }
            "skip" | "space" => {
                self.require_data(name, line)?;
                let parts = source::split_operands(args);
                let (count, fill) = match parts.as_slice() {
                    [count] => (*count, None),
                    [count, fill] => (*count, Some(*fill)),
                    _ => {
                        return Err(err(CompileErrorKind::MalformedDirective(format!(
                            "`.{name}` expects `count[, fill]`"
                        ))));
                    }
                };
                let count = self.constant(count, ImmRange::Word, line)?;
                if count < 0 {
                    return Err(err(CompileErrorKind::MalformedDirective(format!(
                        "`.{name}` count {count} is negative"
                    ))));
                }
                let fill = match fill {
                    Some(text) => self.constant(text, ImmRange::Byte, line)? as u8,
                    None => 0,
                };
                let len = count as u32;
                self.emit_labelled(line, len, ItemKind::Fill { len, byte: fill })?;
            }
            _ => {
                return Err(err(CompileErrorKind::MalformedDirective(format!(
                    "unknown directive `.{name}`"
                ))));
            }
        }
        Ok(true)
    }

    fn require_data(&self, name: &str, line: usize) -> Result<(), CompileError> {
        if self.section == Section::Data {
            return Ok(());
        }
        Err(CompileError::new(
            line,
            CompileErrorKind::WrongSection(format!("`.{name}` is only allowed in .data")),
        ))
    }

    /// Pads the current section to a multiple of `boundary` bytes.
    fn align(&mut self, boundary: u32, line: usize) -> Result<(), CompileError> {
        let offset = self.offset();
        let aligned = offset.checked_next_multiple_of(boundary).ok_or_else(|| {
            CompileError::new(
                line,
                CompileErrorKind::Layout("section exceeds the 32-bit address space".to_string()),
            )
        })?;
        let padding = aligned - offset;
        if padding == 0 {
            if self.section == Section::Data {
                self.out.segments.data_align = self.out.segments.data_align.max(boundary);
            }
            return Ok(());
        }
        match self.section {
            // Text offsets are always word multiples, so padding is whole words.
            Section::Text => self.emit(line, padding, ItemKind::Nops(padding / WORD_SIZE)),
            Section::Data => {
                self.out.segments.data_align = self.out.segments.data_align.max(boundary);
                self.emit(line, padding, ItemKind::Fill { len: padding, byte: 0 })
            }
        }
    }

    fn equ(&mut self, name: &str, args: &str, line: usize) -> Result<(), CompileError> {
        let parts = source::split_operands(args);
        let [symbol, value] = parts.as_slice() else {
            return Err(CompileError::new(
                line,
                CompileErrorKind::MalformedDirective(format!("`.{name}` expects `name, value`")),
            ));
        };
        if !is_identifier(symbol) {
            return Err(CompileError::new(
                line,
                CompileErrorKind::MalformedDirective(format!("invalid symbol name `{symbol}`")),
            ));
        }
        if self.out.symbols.contains(symbol) || self.pending.iter().any(|(n, _)| n == symbol) {
            return Err(CompileError::new(
                line,
                CompileErrorKind::DuplicateLabel((*symbol).to_string()),
            ));
        }
        let value = self.constant(value, ImmRange::Word, line)?;
        let _ = self.out.symbols.define(
            symbol,
            Symbol {
                kind: SymbolKind::Absolute,
                value,
                line,
            },
        );
        Ok(())
    }

    /// Evaluates an expression that may only use numbers and earlier constants.
    fn constant(&self, text: &str, range: ImmRange, line: usize) -> Result<i64, CompileError> {
        let symbols = &self.out.symbols;
        let lookup = |name: &str| {
            symbols
                .get(name)
                .filter(|s| s.kind == SymbolKind::Absolute)
                .map(|s| s.value)
        };
        operand::immediate(text, range, &lookup).map_err(|kind| {
            let kind = match kind {
                CompileErrorKind::UndefinedSymbol(name) if symbols.contains(&name) => {
                    CompileErrorKind::MalformedDirective(format!(
                        "`{name}` is a label; a constant expression is required"
                    ))
                }
                other => other,
            };
            CompileError::new(line, kind)
        })
    }

    fn constants<const N: usize>(
        &self,
        name: &str,
        args: &str,
        line: usize,
    ) -> Result<[i64; N], CompileError> {
        let parts = source::split_operands(args);
        if parts.len() != N {
            return Err(CompileError::new(
                line,
                CompileErrorKind::MalformedDirective(format!(
                    "`.{name}` expects {N} argument(s), found {}",
                    parts.len()
                )),
            ));
        }
        let mut values = [0i64; N];
        for (slot, text) in values.iter_mut().zip(parts) {
            *slot = self.constant(text, ImmRange::Word, line)?;
        }
        Ok(values)
    }
}
