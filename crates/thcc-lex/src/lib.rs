//! thcc-lex - Lexical analyzer for the thcc front-end.
//!
//! Transforms HolyC-like source text into a positioned token stream:
//!
//! ```text
//! Source bytes  →  Cursor  →  Lexer  →  Vec<Token> (Eof-terminated)
//! ```
//!
//! The lexer is hand-written and byte-oriented with maximal-munch operator
//! recognition: at each position the longest matching operator wins, so
//! `<<=` is one token, `->` is one token, and a leading `/*` always opens a
//! comment. At most three bytes of lookahead are ever needed (`<<=`, `>>=`,
//! `...`).
//!
//! Position tracking lives entirely in [`cursor::Cursor`]: every consumed
//! byte passes through one `advance` method which maintains the byte offset
//! and the 1-based line/column, and each token records the position of the
//! first byte of its lexeme.
//!
//! Fatal conditions (unexpected byte, malformed float, unterminated string,
//! character, or block comment, empty character constant, malformed escape)
//! abort the lex with a [`LexError`] after emitting one positioned
//! diagnostic. Escape-range and unknown-escape problems are warnings and do
//! not abort.

pub mod cursor;
mod edge_cases;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{is_keyword, Token, TokenKind, KEYWORDS};

use thcc_util::Span;

/// A fatal lexical error.
///
/// The same message/span pair is emitted to the diagnostic handler before
/// the lex aborts, so callers may either render the error or rely on the
/// handler's channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Location of the offending token.
    pub span: Span,
}

/// Result alias for lexer operations.
pub type LexResult<T> = Result<T, LexError>;

/// Lexes `source` into a terminated token stream.
///
/// Convenience wrapper over [`Lexer::tokenize`].
///
/// # Examples
///
/// ```
/// use thcc_lex::{tokenize, TokenKind};
/// use thcc_util::Handler;
///
/// let handler = Handler::new("demo.hc");
/// let tokens = tokenize("1 + 2;", &handler).unwrap();
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn tokenize<'a>(source: &'a str, handler: &'a thcc_util::Handler) -> LexResult<Vec<Token>> {
    Lexer::new(source, handler).tokenize()
}
