//! Core lexer implementation.
//!
//! This module contains the `Lexer` struct, the per-token dispatch, and the
//! span bookkeeping. The byte-specific scanning lives in the sibling
//! modules; everything funnels back through [`Lexer::make`] so that every
//! token records the position of the first byte of its lexeme.

use thcc_util::{Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::{LexError, LexResult};

/// Lexer for HolyC-like source code.
///
/// The lexer transforms source text into a terminated token stream. It
/// maintains a [`Cursor`] for position tracking and reports warnings through
/// the shared diagnostic handler; fatal conditions abort the whole lex.
pub struct Lexer<'a> {
    /// Byte cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Diagnostic handler for warnings and the final fatal error.
    pub(crate) handler: &'a Handler,

    /// Byte offset where the current token starts.
    pub(crate) token_start: usize,

    /// Line where the current token starts (1-based).
    token_start_line: u32,

    /// Column where the current token starts (1-based).
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`, reporting into `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Lexes the entire input into a terminated token stream.
    ///
    /// On success the last element is the single `Eof` sentinel. On failure
    /// the positioned error has been emitted to the handler and every token
    /// produced so far is released.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let done = token.is(TokenKind::Eof);
                    tokens.push(token);
                    if done {
                        return Ok(tokens);
                    }
                },
                Err(err) => {
                    self.handler.error(err.message.clone(), err.span);
                    return Err(err);
                },
            }
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace and comments, records the start position, then
    /// dispatches on the first byte of the token.
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(self.make(TokenKind::Eof));
        }

        match self.cursor.current() {
            b'(' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::LParen))
            },
            b')' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::RParen))
            },
            b'{' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::LBrace))
            },
            b'}' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::RBrace))
            },
            b'[' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::LBracket))
            },
            b']' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::RBracket))
            },
            b';' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::Semicolon))
            },
            b':' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::Colon))
            },
            b',' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::Comma))
            },
            b'~' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::BitNot))
            },
            b'`' => {
                self.cursor.advance();
                Ok(self.make(TokenKind::Pow))
            },
            b'+' => Ok(self.lex_plus()),
            b'-' => Ok(self.lex_minus()),
            b'*' => Ok(self.lex_star()),
            b'/' => Ok(self.lex_slash()),
            b'%' => Ok(self.lex_percent()),
            b'<' => Ok(self.lex_less()),
            b'>' => Ok(self.lex_greater()),
            b'^' => Ok(self.lex_caret()),
            b'&' => Ok(self.lex_ampersand()),
            b'|' => Ok(self.lex_pipe()),
            b'=' => Ok(self.lex_equals()),
            b'!' => Ok(self.lex_bang()),
            b'.' => self.lex_dot(),
            b'"' => self.lex_string(),
            b'\'' => self.lex_char(),
            c if c.is_ascii_alphabetic() || c == b'_' => Ok(self.lex_identifier()),
            c if c.is_ascii_digit() => self.lex_number(),
            _ => {
                let c = self.cursor.current_char();
                Err(self.fatal(format!("unexpected character '{}'", c)))
            },
        }
    }

    /// Builds a valueless token spanning from the recorded start to the
    /// current cursor position.
    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_span())
    }

    /// Builds a token carrying a lexeme value.
    pub(crate) fn make_with_value(&self, kind: TokenKind, value: impl Into<String>) -> Token {
        Token::with_value(kind, value, self.token_span())
    }

    /// The span of the token currently being lexed.
    pub(crate) fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Builds a fatal error at the current token.
    pub(crate) fn fatal(&self, message: impl Into<String>) -> LexError {
        LexError {
            message: message.into(),
            span: self.token_span(),
        }
    }

    /// Emits a warning at the current token and continues.
    pub(crate) fn warn(&self, message: impl Into<String>) {
        self.handler.warning(message, self.token_span());
    }
}
