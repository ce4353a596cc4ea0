// SPDX-License-Identifier: PMPL-1.0-or-later

//! Recursive-descent parser for facts, goals, and terms.
//!
//! One syntactic category per call: `parse_goal` recognizes a single
//! `predicate(arg, ...)`; nested arguments may be variables, numbers,
//! atoms, compounds, or lists with head/tail notation.

use crate::clause::Fact;
use crate::term::Term;
use std::fmt;

pub mod lexer;

use lexer::{LexError, Lexer, Span, Token};

/// Variable naming convention applied while tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Variables are `?ident`; the prefix is stripped when stored.
    Query,
    /// Variables are identifiers starting uppercase or underscore.
    Clause,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.message, err.span)
    }
}

/// Parse a single fact or goal: `predicate(arg, ...)`.
pub fn parse_goal(input: &str, mode: ParseMode) -> Result<Fact, ParseError> {
    let mut parser = Parser::new(input, mode)?;
    let fact = parser.parse_fact()?;
    parser.expect_end()?;
    Ok(fact)
}

/// Parse a standalone term. Used by tests and by providers that store
/// bare term text.
pub fn parse_term(input: &str, mode: ParseMode) -> Result<Term, ParseError> {
    let mut parser = Parser::new(input, mode)?;
    let term = parser.parse_term()?;
    parser.expect_end()?;
    Ok(term)
}

struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    end: Span,
}

impl Parser {
    fn new(input: &str, mode: ParseMode) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input, mode).tokenize()?;
        let end = tokens
            .last()
            .map(|&(_, span)| Span::new(span.line, span.column + 1))
            .unwrap_or(Span::new(1, 1));
        Ok(Self {
            tokens,
            pos: 0,
            end,
        })
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn here(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|&(_, span)| span)
            .unwrap_or(self.end)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, context: &str) -> Result<(), ParseError> {
        let span = self.here();
        match self.advance() {
            Some(found) if found == token => Ok(()),
            Some(found) => Err(ParseError::new(
                format!("expected {} {}, found {}", token, context, found),
                span,
            )),
            None => Err(ParseError::new(
                format!("expected {} {}, found end of input", token, context),
                span,
            )),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(extra) => Err(ParseError::new(
                format!("unexpected {} after complete input", extra),
                self.here(),
            )),
        }
    }

    fn parse_fact(&mut self) -> Result<Fact, ParseError> {
        let span = self.here();
        let predicate = match self.advance() {
            Some(Token::Ident(name)) => name,
            Some(found) => {
                return Err(ParseError::new(
                    format!("expected predicate name, found {}", found),
                    span,
                ))
            }
            None => return Err(ParseError::new("empty input, expected a fact", span)),
        };
        self.expect(Token::LParen, "after predicate")?;

        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.parse_term()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(Token::RParen, "after arguments")?;
                break;
            }
        }

        Ok(Fact::new(predicate, args))
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let span = self.here();
        match self.advance() {
            Some(Token::Var(name)) => Ok(Term::Var(name)),
            Some(Token::Number(text)) => Ok(Term::Number(text)),
            Some(Token::LBracket) => self.parse_list(),
            Some(Token::Ident(name)) => {
                if self.eat(&Token::LParen) {
                    let mut args = Vec::new();
                    if !self.eat(&Token::RParen) {
                        loop {
                            args.push(self.parse_term()?);
                            if self.eat(&Token::Comma) {
                                continue;
                            }
                            self.expect(Token::RParen, "after arguments")?;
                            break;
                        }
                    }
                    Ok(Term::Compound(name, args))
                } else {
                    Ok(Term::Atom(name))
                }
            }
            Some(found) => Err(ParseError::new(
                format!("expected a term, found {}", found),
                span,
            )),
            None => Err(ParseError::new(
                "expected a term, found end of input",
                span,
            )),
        }
    }

    /// Parse the remainder of a list after the opening `[`.
    fn parse_list(&mut self) -> Result<Term, ParseError> {
        if self.eat(&Token::RBracket) {
            return Ok(Term::Nil);
        }

        let mut items = vec![self.parse_term()?];
        while self.eat(&Token::Comma) {
            items.push(self.parse_term()?);
        }

        let tail = if self.eat(&Token::Pipe) {
            self.parse_term()?
        } else {
            Term::Nil
        };
        self.expect(Token::RBracket, "to close list")?;

        Ok(Term::list_with_tail(items, tail))
    }
}
