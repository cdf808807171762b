mod error;
mod lexer;
mod parser;

pub use error::{Expected, ParseError, ParseErrorKind};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use parser::{Expression, Parser};

pub(crate) fn parse(s: &str) -> Result<Expression<'_>, ParseError> {
    Parser::new(s).parse()
}
