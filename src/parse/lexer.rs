use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
enum Lexeme {
    #[regex(r"[0-9]")]
    Digit,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("+")]
    Plus,

    #[regex(r"[^0-9()+ \t\r\n]")]
    Char,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// A single decimal digit.
    Integer,
    LeftParen,
    RightParen,
    Plus,
    /// Any other character; the token's slice holds it.
    Other,
    EndOfInput,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "<integer>",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Plus => "'+'",
            Self::Other => "<character>",
            Self::EndOfInput => "<end of input>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Lexeme> for TokenKind {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Digit => Self::Integer,
            Lexeme::LeftParen => Self::LeftParen,
            Lexeme::RightParen => Self::RightParen,
            Lexeme::Plus => Self::Plus,
            Lexeme::Char | Lexeme::Error => Self::Other,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub slice: &'a str,
    /// Byte offset of the token in the source.
    pub position: usize,
}

impl<'a> Token<'a> {
    /// Value of an [TokenKind::Integer] token.
    pub fn digit(&self) -> Option<u32> {
        match self.kind {
            TokenKind::Integer => self.slice.chars().next()?.to_digit(10),
            _ => None,
        }
    }

    /// Whether this is an [TokenKind::Other] token holding `c`.
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Other && self.slice.starts_with(c) && self.slice.len() == c.len_utf8()
    }
}

/// Exposes the current token of a source string and advances one token at a time.
pub struct Tokenizer<'a> {
    source: &'a str,
    lexer: logos::Lexer<'a, Lexeme>,
    current: Token<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexeme::lexer(source);
        let current = Self::next_token(source, &mut lexer);
        Self {
            source,
            lexer,
            current,
        }
    }

    fn next_token(source: &'a str, lexer: &mut logos::Lexer<'a, Lexeme>) -> Token<'a> {
        match lexer.next() {
            Some(lexeme) => Token {
                kind: lexeme.into(),
                slice: lexer.slice(),
                position: lexer.span().start,
            },
            None => Token {
                kind: TokenKind::EndOfInput,
                slice: "",
                position: source.len(),
            },
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn current(&self) -> Token<'a> {
        self.current
    }

    pub fn advance(&mut self) {
        if self.current.kind != TokenKind::EndOfInput {
            self.current = Self::next_token(self.source, &mut self.lexer);
        }
    }

    /// Source text following the current token.
    pub fn remainder(&self) -> &'a str {
        let end = self.current.position + self.current.slice.len();
        self.source.get(end..).unwrap_or("")
    }
}
