//! Identifier and keyword lexing.

use crate::token::{is_keyword, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore and continue with
    /// letters, digits, or underscores. The lexeme is compared against the
    /// keyword set (case-sensitive, exact match) and stored as the token's
    /// value either way.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        loop {
            let c = self.cursor.current();
            if !c.is_ascii_alphanumeric() && c != b'_' {
                break;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.make_with_value(kind, text)
    }
}
