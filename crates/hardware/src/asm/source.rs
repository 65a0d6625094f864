//! Source Line Classification.
//!
//! Splits one line of assembly into its parts. It performs the following:
//! 1. **Comment Stripping:** Removes `#` and `//` comments that are not inside quotes.
//! 2. **Label Extraction:** Collects any number of leading `name:` definitions.
//! 3. **Statement Classification:** Identifies the rest as a directive or an instruction.
//! 4. **Operand Splitting:** Separates operands at top-level commas.

use nom::{
    IResult,
    bytes::complete::take_while,
    character::complete::{char, satisfy, space0},
    combinator::recognize,
    sequence::{pair, terminated},
};

/// The statement carried by a line, after labels are removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    /// A `.name args` directive. `name` is lower-case and excludes the dot.
    Directive {
        /// Directive name.
        name: String,
        /// Unparsed argument text.
        args: &'a str,
    },
    /// A `mnemonic operands` instruction. `mnemonic` is lower-case.
    Instruction {
        /// Instruction mnemonic.
        mnemonic: String,
        /// Unparsed operand text.
        operands: &'a str,
    },
}

/// One classified source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Labels defined on this line, in order.
    pub labels: Vec<&'a str>,
    /// The directive or instruction, if any.
    pub statement: Option<Statement<'a>>,
}

impl SourceLine<'_> {
    /// Returns `true` if the line has neither labels nor a statement.
    pub fn is_blank(&self) -> bool {
        self.labels.is_empty() && self.statement.is_none()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$')
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$')
}

/// Parses a symbol identifier: `[A-Za-z_.$][A-Za-z0-9_.$]*`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char)))(input)
}

/// Returns `true` if the whole string is one identifier.
pub fn is_identifier(s: &str) -> bool {
    matches!(identifier(s), Ok(("", _)))
}

fn label(input: &str) -> IResult<&str, &str> {
    terminated(identifier, pair(space0, char(':')))(input)
}

/// Removes a trailing `#` or `//` comment, ignoring markers inside quotes.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev_slash = false;
    for (idx, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '#' => return &line[..idx],
            '/' if prev_slash => return &line[..idx - 1],
            '"' | '\'' => quote = Some(c),
            _ => {}
        }
        prev_slash = c == '/';
    }
    line
}

/// Classifies one raw source line.
///
/// Never fails: anything that is not a label or directive is returned as an
/// instruction, and the mnemonic is validated later.
pub fn parse_line(number: usize, raw: &str) -> SourceLine<'_> {
    let mut rest = strip_comment(raw).trim();
    let mut labels = Vec::new();
    while let Ok((tail, name)) = label(rest) {
        labels.push(name);
        rest = tail.trim_start();
    }

    let statement = if rest.is_empty() {
        None
    } else {
        let split = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split);
        let tail = tail.trim();
        match head.strip_prefix('.') {
            Some(name) => Some(Statement::Directive {
                name: name.to_ascii_lowercase(),
                args: tail,
            }),
            None => Some(Statement::Instruction {
                mnemonic: head.to_ascii_lowercase(),
                operands: tail,
            }),
        }
    };

    SourceLine {
        number,
        labels,
        statement,
    }
}

/// Splits an operand list at commas outside parentheses and quotes.
///
/// Each piece is trimmed. An empty or all-whitespace input yields no
/// operands; an empty piece between commas is kept so it can be rejected.
pub fn split_operands(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
