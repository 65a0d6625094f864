//! Assembler Expressions.
//!
//! Parses and evaluates the constant expressions accepted wherever an
//! immediate, address, or data value is expected:
//! 1. **Literals:** decimal, `0x` hex, `0b` binary, and `'c'` character literals.
//! 2. **Symbols:** labels and `.equ` constants, looked up at evaluation time.
//! 3. **Operators:** unary `-`, binary `+` and `-`, and parentheses.
//! 4. **Relocation operators:** `%hi(e)`, `%lo(e)`, `%hiadj(e)` select 16-bit halves of a value.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit1, hex_digit1, none_of, one_of, space0},
    combinator::{all_consuming, map, map_res, value},
    sequence::{delimited, pair, preceded},
};

use super::source::identifier;
use crate::common::error::CompileErrorKind;

/// A 16-bit field selector applied to an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelocOp {
    /// Bits 31-16.
    Hi,
    /// Bits 15-0.
    Lo,
    /// Bits 31-16, adjusted for a sign-extended `%lo` added afterwards.
    HiAdj,
}

impl RelocOp {
    /// Applies the selector to a 32-bit value.
    pub const fn apply(self, value: u32) -> u32 {
        match self {
            Self::Hi => (value >> 16) & 0xFFFF,
            Self::Lo => value & 0xFFFF,
            Self::HiAdj => ((value >> 16).wrapping_add((value >> 15) & 1)) & 0xFFFF,
        }
    }
}

/// Parsed expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Integer or character literal.
    Number(i64),
    /// Reference to a label or constant.
    Symbol(String),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Sum.
    Add(Box<Expr>, Box<Expr>),
    /// Difference.
    Sub(Box<Expr>, Box<Expr>),
    /// `%hi`, `%lo` or `%hiadj` applied to a sub-expression.
    Reloc(RelocOp, Box<Expr>),
}

impl Expr {
    /// Evaluates the expression.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Resolves a symbol name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`CompileErrorKind::UndefinedSymbol`] for the first symbol
    /// `lookup` cannot resolve, or [`CompileErrorKind::MalformedOperand`] on
    /// arithmetic overflow.
    pub fn eval<F>(&self, lookup: &F) -> Result<i64, CompileErrorKind>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let overflow = || CompileErrorKind::MalformedOperand("expression overflows".to_string());
        match self {
            Self::Number(n) => Ok(*n),
            Self::Symbol(name) => {
                lookup(name).ok_or_else(|| CompileErrorKind::UndefinedSymbol(name.clone()))
            }
            Self::Neg(inner) => inner.eval(lookup)?.checked_neg().ok_or_else(overflow),
            Self::Add(lhs, rhs) => lhs
                .eval(lookup)?
                .checked_add(rhs.eval(lookup)?)
                .ok_or_else(overflow),
            Self::Sub(lhs, rhs) => lhs
                .eval(lookup)?
                .checked_sub(rhs.eval(lookup)?)
                .ok_or_else(overflow),
            Self::Reloc(op, inner) => Ok(i64::from(op.apply(inner.eval(lookup)? as u32))),
        }
    }

    /// Returns `true` if the outermost operator is `%hi`, `%lo` or `%hiadj`.
    ///
    /// Such values are raw 16-bit fields and skip signed/unsigned range checks.
    pub const fn is_reloc(&self) -> bool {
        matches!(self, Self::Reloc(..))
    }
}

/// Parses an expression, requiring the whole (trimmed) text to be consumed.
///
/// # Errors
///
/// Returns [`CompileErrorKind::MalformedOperand`] if the text is not a valid expression.
pub fn parse_expr(text: &str) -> Result<Expr, CompileErrorKind> {
    all_consuming(expression)(text.trim())
        .map(|(_, expr)| expr)
        .map_err(|_| CompileErrorKind::MalformedOperand(format!("invalid expression `{text}`")))
}

/// Parses an expression prefix; surrounding spaces are consumed.
pub fn expression(input: &str) -> IResult<&str, Expr> {
    let (mut input, mut acc) = atom(input)?;
    loop {
        match pair(delimited(space0, one_of("+-"), space0), atom)(input) {
            Ok((rest, (op, rhs))) => {
                acc = if op == '+' {
                    Expr::Add(Box::new(acc), Box::new(rhs))
                } else {
                    Expr::Sub(Box::new(acc), Box::new(rhs))
                };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        }
    }
}

fn atom(input: &str) -> IResult<&str, Expr> {
    delimited(
        space0,
        alt((
            map(number, Expr::Number),
            map(char_literal, Expr::Number),
            reloc,
            delimited(char('('), expression, char(')')),
            map(preceded(char('-'), atom), |e| Expr::Neg(Box::new(e))),
            preceded(char('+'), atom),
            map(identifier, |s: &str| Expr::Symbol(s.to_string())),
        )),
        space0,
    )(input)
}

fn number(input: &str) -> IResult<&str, i64> {
    alt((
        map_res(preceded(tag_no_case("0x"), hex_digit1), |s: &str| {
            i64::from_str_radix(s, 16)
        }),
        map_res(
            preceded(tag_no_case("0b"), take_while1(|c: char| c == '0' || c == '1')),
            |s: &str| i64::from_str_radix(s, 2),
        ),
        map_res(digit1, |s: &str| s.parse::<i64>()),
    ))(input)
}

/// Parses one possibly-escaped character (`\n`, `\t`, `\r`, `\0`, `\\`, `\'`, `\"`).
pub fn escaped_char(input: &str) -> IResult<&str, char> {
    alt((
        preceded(
            char('\\'),
            alt((
                value('\n', char('n')),
                value('\t', char('t')),
                value('\r', char('r')),
                value('\0', char('0')),
                value('\\', char('\\')),
                value('\'', char('\'')),
                value('"', char('"')),
            )),
        ),
        none_of("\\"),
    ))(input)
}

fn char_literal(input: &str) -> IResult<&str, i64> {
    map(delimited(char('\''), escaped_char, char('\'')), |c| {
        i64::from(u32::from(c))
    })(input)
}

fn reloc(input: &str) -> IResult<&str, Expr> {
    map(
        pair(
            preceded(
                char('%'),
                alt((
                    value(RelocOp::HiAdj, tag_no_case("hiadj")),
                    value(RelocOp::Hi, tag_no_case("hi")),
                    value(RelocOp::Lo, tag_no_case("lo")),
                )),
            ),
            delimited(pair(space0, char('(')), expression, char(')')),
        ),
        |(op, inner)| Expr::Reloc(op, Box::new(inner)),
    )(input)
}
