//! String and character literal lexing.
//!
//! Both literal forms decode escape sequences into single bytes, widened to
//! `char` so payloads remain `String`s; `\xFF` therefore decodes to the one
//! logical character U+00FF. Token spans cover the surrounding quotes.

use crate::token::{Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Lexes a string literal.
    ///
    /// The contents are decoded; the token value is the payload without the
    /// quotes. Reaching end of input before the closing quote is fatal; a
    /// newline inside the literal is taken literally.
    pub(crate) fn lex_string(&mut self) -> LexResult<Token> {
        self.cursor.advance();

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.fatal("unterminated string literal"));
            }
            match self.cursor.current() {
                b'"' => {
                    self.cursor.advance();
                    break;
                },
                b'\\' => {
                    self.cursor.advance();
                    content.push(self.lex_escape()?);
                },
                _ => {
                    let c = self.cursor.current_char();
                    content.push(c);
                    self.cursor.advance_by(c.len_utf8());
                },
            }
        }

        Ok(self.make_with_value(TokenKind::Str, content))
    }

    /// Lexes a character literal: exactly one logical character, which may
    /// be an escape. `''` and a missing closing quote are fatal.
    pub(crate) fn lex_char(&mut self) -> LexResult<Token> {
        self.cursor.advance();

        if self.cursor.is_at_end() {
            return Err(self.fatal("unterminated character constant"));
        }

        let c = match self.cursor.current() {
            b'\'' => return Err(self.fatal("empty character constant")),
            b'\\' => {
                self.cursor.advance();
                self.lex_escape()?
            },
            _ => {
                let c = self.cursor.current_char();
                self.cursor.advance_by(c.len_utf8());
                c
            },
        };

        if self.cursor.current() != b'\'' {
            return Err(self.fatal("unterminated character constant"));
        }
        self.cursor.advance();

        Ok(self.make_with_value(TokenKind::Char, c.to_string()))
    }

    /// Decodes one escape sequence; the cursor sits just past the backslash.
    ///
    /// Recognized forms: the single-character escapes `n t r v b f a \ " '`,
    /// `\x` with 1-8 hex digits, and 1-3 octal digits. Values above 0xFF are
    /// truncated to one byte with a warning. An unrecognized escape yields
    /// the character itself with a warning. End of input here is fatal.
    pub(crate) fn lex_escape(&mut self) -> LexResult<char> {
        if self.cursor.is_at_end() {
            return Err(self.fatal("unterminated escape sequence"));
        }

        let c = self.cursor.current();
        match c {
            b'n' | b't' | b'r' | b'v' | b'b' | b'f' | b'a' | b'\\' | b'"' | b'\'' => {
                self.cursor.advance();
                Ok(match c {
                    b'n' => '\n',
                    b't' => '\t',
                    b'r' => '\r',
                    b'v' => '\x0B',
                    b'b' => '\x08',
                    b'f' => '\x0C',
                    b'a' => '\x07',
                    other => other as char,
                })
            },
            b'x' => {
                self.cursor.advance();
                let mut value: u64 = 0;
                let mut digits = 0;
                while digits < 8 {
                    let Some(d) = (self.cursor.current() as char).to_digit(16) else {
                        break;
                    };
                    value = value * 16 + u64::from(d);
                    digits += 1;
                    self.cursor.advance();
                }
                if digits == 0 {
                    return Err(self.fatal("expected hexadecimal digits after '\\x'"));
                }
                if value > 0xFF {
                    self.warn("hexadecimal escape sequence out of range");
                }
                Ok(char::from((value & 0xFF) as u8))
            },
            b'0'..=b'7' => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 3 && (b'0'..=b'7').contains(&self.cursor.current()) {
                    value = value * 8 + u32::from(self.cursor.current() - b'0');
                    digits += 1;
                    self.cursor.advance();
                }
                if value > 0xFF {
                    self.warn("octal escape sequence out of range");
                }
                Ok(char::from((value & 0xFF) as u8))
            },
            b'8' | b'9' => Err(self.fatal("expected octal digits after '\\'")),
            _ => {
                let c = self.cursor.current_char();
                self.cursor.advance_by(c.len_utf8());
                self.warn(format!("unrecognized escape sequence '\\{}'", c));
                Ok(c)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;
    use thcc_util::Handler;

    fn lex_value(source: &str) -> String {
        let handler = Handler::new("test.hc");
        let mut lexer = Lexer::new(source, &handler);
        lexer.next_token().unwrap().text().to_string()
    }

    #[test]
    fn test_simple_string() {
        assert_eq!(lex_value("\"hello\""), "hello");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(lex_value("\"\""), "");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(lex_value("\"a\\nb\""), "a\nb");
        assert_eq!(lex_value("\"a\\tb\""), "a\tb");
        assert_eq!(lex_value("\"\\\\\""), "\\");
        assert_eq!(lex_value("\"\\\"\""), "\"");
        assert_eq!(lex_value("\"\\a\\b\\f\\v\""), "\x07\x08\x0C\x0B");
    }

    #[test]
    fn test_hex_escape() {
        assert_eq!(lex_value("\"\\x41\""), "A");
        assert_eq!(lex_value("\"\\x4a\""), "J");
        assert_eq!(lex_value("\"\\xFF\""), "\u{FF}");
    }

    #[test]
    fn test_spec_scenario_string() {
        // "hi\n\x41" decodes to exactly h, i, newline, A.
        assert_eq!(lex_value("\"hi\\n\\x41\""), "hi\nA");
    }

    #[test]
    fn test_octal_escape() {
        assert_eq!(lex_value("\"\\101\""), "A");
        assert_eq!(lex_value("\"\\0\""), "\0");
        assert_eq!(lex_value("\"\\7\""), "\x07");
    }

    #[test]
    fn test_octal_stops_at_three_digits() {
        assert_eq!(lex_value("\"\\1014\""), "A4");
    }

    #[test]
    fn test_hex_overflow_warns() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("\"\\x1FF\"", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].text(), "\u{FF}");
        assert_eq!(handler.warning_count(), 1);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_unrecognized_escape_warns() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("\"\\q\"", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].text(), "q");
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn test_unterminated_string() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("\"unterminated", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn test_backslash_at_eof() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("\"abc\\", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated escape sequence");
    }

    #[test]
    fn test_missing_hex_digits() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("\"\\xg\"", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "expected hexadecimal digits after '\\x'");
    }

    #[test]
    fn test_string_span_covers_quotes() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("\"hi\"", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].span.len(), 4);
    }

    #[test]
    fn test_char_literal() {
        let handler = Handler::new("test.hc");
        let tokens = Lexer::new("'a'", &handler).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Char);
        assert_eq!(tokens[0].text(), "a");
        assert_eq!(tokens[0].span.len(), 3);
    }

    #[test]
    fn test_char_escape() {
        assert_eq!(lex_value("'\\n'"), "\n");
        assert_eq!(lex_value("'\\''"), "'");
        assert_eq!(lex_value("'\\x41'"), "A");
    }

    #[test]
    fn test_empty_char() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("''", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "empty character constant");
    }

    #[test]
    fn test_unterminated_char() {
        let handler = Handler::new("test.hc");
        let err = Lexer::new("'ab'", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated character constant");

        let handler = Handler::new("test.hc");
        let err = Lexer::new("'a", &handler).tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated character constant");
    }
}
