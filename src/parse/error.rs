use super::lexer::{Token, TokenKind};
use crate::common::UInt;
use crate::model::SubPoolSizeError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("error at position {position} ({slice:?}): {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset of the offending token. Everything before an error is ASCII,
    /// so this is also its character offset.
    pub position: usize,
    pub found: TokenKind,
    pub slice: String,
}

impl ParseError {
    pub(crate) fn at(token: Token<'_>, kind: ParseErrorKind) -> Self {
        Self {
            kind,
            position: token.position,
            found: token.kind,
            slice: token.slice.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: Vec<Expected> },
    IntegerOverflow,
    ZeroValue,
    /// A dice count or explosion chain above the per-term limit.
    TooManyDice { limit: UInt },
    SubPool(SubPoolSizeError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::IntegerOverflow => write!(f, "integer does not fit in 32 bits"),
            Self::ZeroValue => write!(f, "expected a non-zero integer"),
            Self::TooManyDice { limit } => write!(f, "a term may roll at most {} dice", limit),
            Self::SubPool(why) => write!(f, "while building sub-pool: {}", why),
        }
    }
}

/// Something the parser would have accepted at an error position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Expected {
    Token(TokenKind),
    Char(char),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => f.write_str(kind.as_str()),
            Self::Char(c) => write!(f, "'{}'", c),
        }
    }
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Self::Token(kind)
    }
}

impl From<char> for Expected {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

fn fmt_expected(expected: &[Expected], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => write!(f, "{}", a),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => {
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}
