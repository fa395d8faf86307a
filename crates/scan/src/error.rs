//! Syntax errors reported by the scanner, the quote helpers and the rewrites.

use thiserror::Error;

/// What went wrong at the failing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedEnd,
    UnexpectedByte(u8),
    InvalidEscape,
    InvalidSurrogate,
    ControlCharacter,
    InvalidNumber,
    InvalidLiteral,
    TrailingData,
    NestingTooDeep,
    NotQuoted,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            SyntaxErrorKind::UnexpectedByte(b) if b.is_ascii_graphic() => {
                write!(f, "unexpected character '{}'", *b as char)
            }
            SyntaxErrorKind::UnexpectedByte(b) => write!(f, "unexpected byte 0x{b:02x}"),
            SyntaxErrorKind::InvalidEscape => write!(f, "invalid escape sequence"),
            SyntaxErrorKind::InvalidSurrogate => write!(f, "invalid surrogate pair"),
            SyntaxErrorKind::ControlCharacter => write!(f, "control character in string"),
            SyntaxErrorKind::InvalidNumber => write!(f, "invalid number"),
            SyntaxErrorKind::InvalidLiteral => write!(f, "invalid literal"),
            SyntaxErrorKind::TrailingData => write!(f, "data after end of document"),
            SyntaxErrorKind::NestingTooDeep => write!(f, "nesting too deep"),
            SyntaxErrorKind::NotQuoted => write!(f, "not a double-quoted string"),
        }
    }
}

/// Input is not valid JSON at byte `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid JSON at offset {offset}: {kind}")]
pub struct SyntaxError {
    pub offset: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub fn new(offset: usize, kind: SyntaxErrorKind) -> Self {
        Self { offset, kind }
    }
}
