//! Operand Parsing.
//!
//! Turns operand text into register indices, memory references, checked
//! immediates, and string literals.

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, space0},
    combinator::{all_consuming, map, map_opt},
    multi::many0,
    sequence::{delimited, pair},
};

use super::expr::{Expr, escaped_char, expression, parse_expr};
use super::source::identifier;
use crate::common::error::CompileErrorKind;
use crate::isa::abi;

/// Accepted range of an immediate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmRange {
    /// 16-bit two's complement: -32768..=32767.
    Signed16,
    /// 16-bit unsigned: 0..=65535.
    Unsigned16,
    /// Shift amount: 0..=31.
    Shift5,
    /// Byte data: -128..=255.
    Byte,
    /// Half-word data: -32768..=65535.
    Half,
    /// Word data or address: -2^31..=2^32-1.
    Word,
}

impl ImmRange {
    /// Smallest and largest accepted values.
    pub const fn bounds(self) -> (i64, i64) {
        match self {
            Self::Signed16 => (i16::MIN as i64, i16::MAX as i64),
            Self::Unsigned16 => (0, u16::MAX as i64),
            Self::Shift5 => (0, 31),
            Self::Byte => (i8::MIN as i64, u8::MAX as i64),
            Self::Half => (i16::MIN as i64, u16::MAX as i64),
            Self::Word => (i32::MIN as i64, u32::MAX as i64),
        }
    }

    /// Checks `value` against the range.
    ///
    /// # Errors
    ///
    /// Returns [`CompileErrorKind::ImmediateOutOfRange`] if it does not fit.
    pub const fn check(self, value: i64) -> Result<i64, CompileErrorKind> {
        let (min, max) = self.bounds();
        if value < min || value > max {
            return Err(CompileErrorKind::ImmediateOutOfRange { value, min, max });
        }
        Ok(value)
    }
}

/// Parses a register name (`r0`..`r31` or an alias).
///
/// # Errors
///
/// Returns [`CompileErrorKind::MalformedOperand`] if the text is not a register.
pub fn register(text: &str) -> Result<usize, CompileErrorKind> {
    abi::parse(text.trim())
        .ok_or_else(|| CompileErrorKind::MalformedOperand(format!("expected register, found `{text}`")))
}

fn paren_register(input: &str) -> IResult<&str, usize> {
    delimited(
        pair(space0, char('(')),
        delimited(space0, map_opt(identifier, abi::parse), space0),
        pair(char(')'), space0),
    )(input)
}

fn memory_ref(input: &str) -> IResult<&str, (Expr, usize)> {
    alt((
        map(paren_register, |reg| (Expr::Number(0), reg)),
        pair(expression, paren_register),
    ))(input)
}

/// Parses a memory operand `expr(rA)` or `(rA)`.
///
/// # Errors
///
/// Returns [`CompileErrorKind::MalformedOperand`] if the text has another shape.
pub fn memory(text: &str) -> Result<(Expr, usize), CompileErrorKind> {
    all_consuming(memory_ref)(text.trim())
        .map(|(_, parsed)| parsed)
        .map_err(|_| {
            CompileErrorKind::MalformedOperand(format!(
                "expected memory operand `offset(reg)`, found `{text}`"
            ))
        })
}

/// Parses a quoted string literal with escapes, returning its bytes.
///
/// # Errors
///
/// Returns [`CompileErrorKind::MalformedDirective`] if the text is not one
/// double-quoted string.
pub fn string_literal(text: &str) -> Result<Vec<u8>, CompileErrorKind> {
    let parsed: IResult<&str, Vec<char>> =
        all_consuming(delimited(char('"'), many0(string_char), char('"')))(text.trim());
    match parsed {
        Ok((_, chars)) => {
            let s: String = chars.into_iter().collect();
            Ok(s.into_bytes())
        }
        Err(_) => Err(CompileErrorKind::MalformedDirective(format!(
            "expected string literal, found `{text}`"
        ))),
    }
}

fn string_char(input: &str) -> IResult<&str, char> {
    match input.chars().next() {
        Some('"') | None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
        Some(_) => escaped_char(input),
    }
}

/// Parses and evaluates an expression, then range-checks it.
///
/// A top-level `%hi`, `%lo` or `%hiadj` yields a raw 16-bit field and is
/// accepted for any 16-bit range.
///
/// # Errors
///
/// Propagates parse and evaluation errors and
/// [`CompileErrorKind::ImmediateOutOfRange`].
pub fn immediate<F>(text: &str, range: ImmRange, lookup: &F) -> Result<i64, CompileErrorKind>
where
    F: Fn(&str) -> Option<i64>,
{
    let expr = parse_expr(text)?;
    checked_value(&expr, range, lookup)
}

/// Evaluates an already parsed expression and range-checks it.
///
/// # Errors
///
/// Same as [`immediate`].
pub fn checked_value<F>(expr: &Expr, range: ImmRange, lookup: &F) -> Result<i64, CompileErrorKind>
where
    F: Fn(&str) -> Option<i64>,
{
    let value = expr.eval(lookup)?;
    if expr.is_reloc() && matches!(range, ImmRange::Signed16 | ImmRange::Unsigned16) {
        return Ok(value);
    }
    range.check(value)
}
