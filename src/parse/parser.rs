use super::error::{Expected, ParseError, ParseErrorKind};
use super::lexer::{Token, TokenKind, Tokenizer};
use crate::common::*;
use crate::model::{Die, ExplodingDie, Modifier, Node, Pool, SubPool};

type PResult<T> = Result<T, ParseError>;

/// A parsed pool along with the text following its `;` comment marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<'a> {
    pub pool: Pool,
    pub comment: Option<&'a str>,
}

pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    const COMMENT: char = ';';
    const DIE: char = 'd';
    const EXPLODE: char = '!';
    const OF: char = 'o';
    const DEFAULT_CHAIN: NonZeroUInt = NonZeroUInt::new(3).unwrap();
    /// Most dice a single term may roll, and the longest explosion chain.
    pub const MAX_DICE: UInt = 10_000;

    pub fn new(s: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(s),
        }
    }

    pub fn parse(mut self) -> PResult<Expression<'a>> {
        let pool = self.parse_pool()?;

        let token = self.current();
        let comment = if token.is_char(Self::COMMENT) {
            Some(self.tokens.remainder().trim()).filter(|s| !s.is_empty())
        } else if token.kind == TokenKind::EndOfInput {
            None
        } else {
            return self.unexpected(vec![
                TokenKind::Plus.into(),
                TokenKind::EndOfInput.into(),
                Self::COMMENT.into(),
            ]);
        };

        log::debug!("parsed {:?} as {}", self.tokens.source(), pool);
        Ok(Expression { pool, comment })
    }

    fn current(&self) -> Token<'a> {
        self.tokens.current()
    }

    fn advance(&mut self) {
        self.tokens.advance();
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn matches_char(&self, c: char) -> bool {
        self.current().is_char(c)
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected(vec![expected.into()])
        }
    }

    fn consume_char(&mut self, expected: char) -> PResult<()> {
        if self.matches_char(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected(vec![expected.into()])
        }
    }

    fn error<T>(&self, token: Token<'_>, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError::at(token, kind))
    }

    fn unexpected<T>(&self, expected: Vec<Expected>) -> PResult<T> {
        self.error(self.current(), ParseErrorKind::UnexpectedToken { expected })
    }

    /// POOL := (DICE | SUBPOOL) ('+' POOL)?
    fn parse_pool(&mut self) -> PResult<Pool> {
        let mut children = Vec::new();

        loop {
            let token = self.current();
            if token.kind == TokenKind::Integer || token.is_char(Self::DIE) {
                children.extend(self.parse_dice()?);
            } else if token.is_char(Selection::Best.as_char())
                || token.is_char(Selection::Worst.as_char())
            {
                children.push(self.parse_sub_pool()?.into());
            } else {
                return self.unexpected(vec![
                    TokenKind::Integer.into(),
                    Self::DIE.into(),
                    Selection::Best.as_char().into(),
                    Selection::Worst.as_char().into(),
                ]);
            }

            if self.matches(TokenKind::Plus) {
                self.advance();
            } else if self.matches(TokenKind::EndOfInput)
                || self.matches(TokenKind::RightParen)
                || self.matches_char(Self::COMMENT)
            {
                break;
            } else {
                return self.unexpected(vec![
                    TokenKind::Plus.into(),
                    TokenKind::RightParen.into(),
                    TokenKind::EndOfInput.into(),
                ]);
            }
        }

        // every iteration pushes at least one node or returns early
        match NonEmpty::try_from_vec(children) {
            Ok(children) => Ok(Pool::new(children)),
            Err(_) => self.unexpected(vec![TokenKind::Integer.into(), Self::DIE.into()]),
        }
    }

    /// SUBPOOL := ('b' | 'w') NUMBER? 'o' '(' POOL ')'
    fn parse_sub_pool(&mut self) -> PResult<SubPool> {
        let selection = if self.matches_char(Selection::Best.as_char()) {
            Selection::Best
        } else if self.matches_char(Selection::Worst.as_char()) {
            Selection::Worst
        } else {
            return self.unexpected(vec![
                Selection::Best.as_char().into(),
                Selection::Worst.as_char().into(),
            ]);
        };
        self.advance();

        let n = if self.matches(TokenKind::Integer) {
            self.parse_number()?
        } else {
            1
        };

        self.consume_char(Self::OF)?;
        self.consume(TokenKind::LeftParen)?;
        let pool = self.parse_pool()?;
        self.consume(TokenKind::RightParen)?;

        SubPool::new(pool.into_children(), n as usize, selection)
            .or_else(|why| self.error(self.current(), ParseErrorKind::SubPool(why)))
    }

    /// DICE := NUMBER? ('d' NUMBER ('!' NUMBER?)?)?
    fn parse_dice(&mut self) -> PResult<Vec<Node>> {
        let count_token = self.current();
        let count = if self.matches(TokenKind::Integer) {
            Some(self.parse_number()?)
        } else {
            None
        };

        if !self.matches_char(Self::DIE) {
            let value = count.unwrap_or(1);
            return Ok(vec![Modifier::new(value.into()).into()]);
        }
        self.advance();

        let count = match count {
            Some(0) => return self.error(count_token, ParseErrorKind::ZeroValue),
            Some(n) if n > Self::MAX_DICE => return self.too_many(count_token),
            Some(n) => n,
            None => 1,
        };

        let faces = self.parse_non_zero()?;
        let die: Node = if self.matches_char(Self::EXPLODE) {
            self.advance();
            let chain = if self.matches(TokenKind::Integer) {
                let chain_token = self.current();
                let chain = self.parse_non_zero()?;
                if chain.get() > Self::MAX_DICE {
                    return self.too_many(chain_token);
                }
                chain
            } else {
                Self::DEFAULT_CHAIN
            };
            ExplodingDie::new(faces, chain).into()
        } else {
            Die::new(faces).into()
        };

        Ok(vec![die; count as usize])
    }

    fn too_many<T>(&self, token: Token<'a>) -> PResult<T> {
        self.error(
            token,
            ParseErrorKind::TooManyDice {
                limit: Self::MAX_DICE,
            },
        )
    }

    fn parse_non_zero(&mut self) -> PResult<NonZeroUInt> {
        let token = self.current();
        let x = self.parse_number()?;
        match NonZeroUInt::new(x) {
            Some(x) => Ok(x),
            None => self.error(token, ParseErrorKind::ZeroValue),
        }
    }

    /// NUMBER := INT+
    fn parse_number(&mut self) -> PResult<UInt> {
        if !self.matches(TokenKind::Integer) {
            return self.unexpected(vec![TokenKind::Integer.into()]);
        }

        let mut number: UInt = 0;
        while let Some(digit) = self.current().digit() {
            number = match number.checked_mul(10).and_then(|x| x.checked_add(digit)) {
                Some(x) => x,
                None => return self.error(self.current(), ParseErrorKind::IntegerOverflow),
            };
            self.advance();
        }
        Ok(number)
    }
}
