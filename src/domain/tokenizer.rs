//! Lexical scanner for infix (or postfix) arithmetic expressions.
//!
//! Only binary operators and non-negative integer operands are considered.
//! `*`, `/`, `+`, `-`, `(`, `)`, runs of digits, and single letters are
//! separate tokens; spaces only separate them:
//!
//! ```text
//! (1 + 2) * (a - 12)  =>  ["(", "1", "+", "2", ")", "*", "(", "a", "-", "12", ")"]
//! ```

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::error::DomainError;

/// The operator and parenthesis characters recognized as one-character tokens.
pub const OPERATORS: [char; 6] = ['*', '/', '+', '-', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Operator,
    LeftParen,
    RightParen,
    /// Single letter operand
    Identifier,
    /// Maximal run of decimal digits
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    fn symbol(kind: TokenKind, c: char) -> Self {
        Self {
            kind,
            text: c.to_string(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.text
    }
}

/// Digit zero of every run of ten Unicode decimal digits (general category Nd),
/// sorted. Each run is contiguous and ascending from its zero.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// True for Unicode decimal digits (Nd): `'7'`, `'٣'`, `'७'`, `'７'`.
fn is_decimal_digit(c: char) -> bool {
    let code = u32::from(c);
    let run = DECIMAL_ZEROS.partition_point(|&zero| zero <= code);
    run > 0 && code - DECIMAL_ZEROS[run - 1] < 10
}

/// Alphabetic characters that are not numeric: letter numbers such as `'Ⅻ'`
/// are rejected.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn symbol_kind(c: char) -> Option<TokenKind> {
    match c {
        '*' | '/' | '+' | '-' => Some(TokenKind::Operator),
        '(' => Some(TokenKind::LeftParen),
        ')' => Some(TokenKind::RightParen),
        _ => None,
    }
}

/// Splits `expression` into typed tokens in a single left-to-right pass.
///
/// # Errors
///
/// `DomainError::UnrecognizedCharacter` for the first character that is not an
/// operator, parenthesis, letter, digit or space. `position` is its 0-based
/// character offset.
#[instrument(level = "debug")]
pub fn tokenize(expression: &str) -> Result<Vec<Token>, DomainError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().enumerate().peekable();

    while let Some((position, (start, c))) = chars.next() {
        if let Some(kind) = symbol_kind(c) {
            tokens.push(Token::symbol(kind, c));
        } else if is_letter(c) {
            tokens.push(Token::symbol(TokenKind::Identifier, c));
        } else if c == ' ' {
            continue;
        } else if is_decimal_digit(c) {
            // longest match: consume the whole digit run
            let mut end = start + c.len_utf8();
            while let Some((_, (offset, next))) =
                chars.next_if(|(_, (_, next))| is_decimal_digit(*next))
            {
                end = offset + next.len_utf8();
            }
            tokens.push(Token {
                kind: TokenKind::Number,
                text: expression[start..end].to_string(),
            });
        } else {
            return Err(DomainError::UnrecognizedCharacter {
                character: c,
                position,
            });
        }
    }

    debug!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

/// Splits `expression` into token strings. See [`tokenize`].
pub fn parse(expression: &str) -> Result<Vec<String>, DomainError> {
    Ok(tokenize(expression)?
        .into_iter()
        .map(Token::into_string)
        .collect())
}

/// True if `token` consists of Unicode decimal digits only. The empty string
/// counts as numeric.
pub fn is_numeric(token: &str) -> bool {
    token.chars().all(is_decimal_digit)
}
