//! Numeric literal lexing.
//!
//! A numeric run is digits with at most one `.`. The textual form is kept
//! verbatim as the token value; no conversion happens in the lexer. Radix
//! prefixes are not recognized: `0x10` lexes as `0` then the identifier
//! `x10`.

use crate::token::{Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Lexes an integer or floating-point literal.
    ///
    /// Entered with the cursor on a digit, or on a `.` followed by a digit.
    /// A second `.` inside the same run is fatal.
    pub(crate) fn lex_number(&mut self) -> LexResult<Token> {
        let mut has_dot = false;

        loop {
            let c = self.cursor.current();
            if c == b'.' {
                if has_dot {
                    return Err(self.fatal("malformed float"));
                }
                has_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = if has_dot {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Ok(self.make_with_value(kind, text))
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;
    use thcc_util::Handler;

    fn lex_num(source: &str) -> (TokenKind, String) {
        let handler = Handler::new("test.hc");
        let mut lexer = Lexer::new(source, &handler);
        let tok = lexer.next_token().unwrap();
        (tok.kind, tok.text().to_string())
    }

    #[test]
    fn test_integer() {
        assert_eq!(lex_num("0"), (TokenKind::Int, "0".into()));
        assert_eq!(lex_num("42"), (TokenKind::Int, "42".into()));
        assert_eq!(lex_num("123456789"), (TokenKind::Int, "123456789".into()));
    }

    #[test]
    fn test_float() {
        assert_eq!(lex_num("3.14"), (TokenKind::Float, "3.14".into()));
        assert_eq!(lex_num(".5"), (TokenKind::Float, ".5".into()));
        assert_eq!(lex_num("5."), (TokenKind::Float, "5.".into()));
    }

    #[test]
    fn test_verbatim_text() {
        // Leading zeros survive; the lexer does no conversion.
        assert_eq!(lex_num("007"), (TokenKind::Int, "007".into()));
        assert_eq!(lex_num("0.50"), (TokenKind::Float, "0.50".into()));
    }

    #[test]
    fn test_malformed_float() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("1..2", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "malformed float");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_second_dot_after_fraction() {
        let handler = Handler::new("test.hc");
        assert!(Lexer::new("1.2.3", &handler).tokenize().is_err());
    }

    #[test]
    fn test_no_radix_prefixes() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("0x10", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].text(), "0");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text(), "x10");
    }

    #[test]
    fn test_number_span_covers_run() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("  12.5;", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].span.start, 2);
        assert_eq!(tokens[0].span.len(), 4);
        assert_eq!(tokens[0].span.column, 3);
    }
}
