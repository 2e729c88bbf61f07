//! thcc-par - Parser for the thcc front-end.
//!
//! Consumes the token stream produced by `thcc-lex` and builds an AST:
//!
//! ```text
//! Vec<Token>  →  Parser  →  Node::Compound (root)
//! ```
//!
//! The parser is recursive descent with one token of lookahead (plus bounded
//! peeking for `else if`, label, and declaration-start decisions) and no
//! backtracking. Expressions follow a fixed precedence ladder, lowest to
//! highest:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | assignment | `=` `+=` `-=` `*=` `/=` `%=` `<<=` `>>=` `&=` `\|=` `^=` | right |
//! | logical or | `\|\|` | left |
//! | logical xor | `^^` | left |
//! | logical and | `&&` | left |
//! | equality | `==` `!=` | left |
//! | relational | `<` `>` `<=` `>=` | left |
//! | additive | `+` `-` | left |
//! | bitwise or | `\|` | left |
//! | bitwise xor | `^` | left |
//! | bitwise and | `&` | left |
//! | multiplicative | `*` `/` `%` | left |
//! | shift/power | `<<` `>>` `` ` `` | left |
//! | unary prefix | `-` `*` | right |
//! | postfix | call, index, `.` `->` | left-chained |
//!
//! Every production returns `Result` and propagates failures with `?`; there
//! is no recovery. The top-level [`Parser::parse`] emits the first error to
//! the diagnostic handler, stops, and returns the statements accumulated so
//! far under the root Compound, so an ill-formed input yields a truncated
//! tree plus one positioned diagnostic.

pub mod ast;
mod edge_cases;
mod expr;
mod items;
pub mod pretty;
mod stmt;
pub mod types;

use thcc_lex::{Token, TokenKind};
use thcc_util::{Handler, Span};

use crate::ast::{CompoundNode, Node};

/// A fatal syntax error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Location of the offending token.
    pub span: Span,
}

/// Result alias for parser productions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent parser over a terminated token stream.
pub struct Parser<'a> {
    /// Token stream from the lexer, ending in the `Eof` sentinel.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    position: usize,

    /// Diagnostic handler the first error is reported to.
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`.
    ///
    /// The stream is expected to be `Eof`-terminated, as produced by the
    /// lexer; a sentinel is appended if missing so lookahead never runs off
    /// the end.
    pub fn new(mut tokens: Vec<Token>, handler: &'a Handler) -> Self {
        if !matches!(tokens.last(), Some(t) if t.is(TokenKind::Eof)) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end, 1, 1)));
        }
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Parses the whole stream into the root Compound.
    ///
    /// Stops at the first statement failure: the error is emitted to the
    /// handler and the statements parsed so far are returned. Callers decide
    /// success by checking the handler.
    pub fn parse(&mut self) -> Node {
        let mut statements = Vec::new();

        while !self.current().is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.handler.error(err.message.clone(), err.span);
                    break;
                },
            }
        }

        Node::Compound(CompoundNode { statements })
    }

    /// Returns the current token.
    pub(crate) fn current(&self) -> &Token {
        self.token_at(self.position)
    }

    /// Returns the token `offset` positions ahead (0 = current).
    pub(crate) fn peek(&self, offset: usize) -> &Token {
        self.token_at(self.position + offset)
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens
            .get(index)
            .unwrap_or_else(|| self.tokens.last().expect("stream is terminated"))
    }

    /// Advances to the next token; sticks at the sentinel.
    pub(crate) fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Clones the current token and advances past it.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.current().clone();
        self.advance();
        token
    }

    /// Returns true if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or fails with `expected {what}`.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!(
                "expected {}, found {}",
                what,
                describe(self.current())
            )))
        }
    }

    /// Consumes the given keyword or fails.
    pub(crate) fn expect_keyword(&mut self, word: &str) -> ParseResult<Token> {
        if self.current().is_keyword(word) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!(
                "expected '{}', found {}",
                word,
                describe(self.current())
            )))
        }
    }

    /// Builds an error at the current token.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            span: self.current().span,
        }
    }
}

/// Describes a token for error messages.
pub(crate) fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Identifier => format!("identifier '{}'", token.text()),
        TokenKind::Keyword => format!("'{}'", token.text()),
        TokenKind::Int | TokenKind::Float => format!("number '{}'", token.text()),
        TokenKind::Str => "string literal".to_string(),
        TokenKind::Char => "character literal".to_string(),
        kind => format!("'{}'", kind.spelling().unwrap_or(kind.name())),
    }
}
