//! Operator and punctuation lexing.
//!
//! Maximal munch: each method greedily consumes the longest operator
//! starting at the current byte, using at most two bytes of lookahead beyond
//! the first (`<<=`, `>>=`).

use crate::token::{Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Lexes `+`, `++`, or `+=`.
    pub(crate) fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'+') {
            self.make(TokenKind::Inc)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::AddEq)
        } else {
            self.make(TokenKind::Add)
        }
    }

    /// Lexes `-`, `--`, `-=`, or `->`.
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'-') {
            self.make(TokenKind::Dec)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::SubEq)
        } else if self.cursor.match_byte(b'>') {
            self.make(TokenKind::Arrow)
        } else {
            self.make(TokenKind::Sub)
        }
    }

    /// Lexes `*` or `*=`.
    pub(crate) fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::MulEq)
        } else {
            self.make(TokenKind::Mul)
        }
    }

    /// Lexes `/` or `/=`.
    ///
    /// `//` and `/*` never reach this method: comment skipping runs before
    /// every dispatch, so the slash-star pair is atomic.
    pub(crate) fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::DivEq)
        } else {
            self.make(TokenKind::Div)
        }
    }

    /// Lexes `%` or `%=`.
    pub(crate) fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::ModEq)
        } else {
            self.make(TokenKind::Mod)
        }
    }

    /// Lexes `<`, `<=`, `<<`, or `<<=`.
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Lte)
        } else if self.cursor.match_byte(b'<') {
            if self.cursor.match_byte(b'=') {
                self.make(TokenKind::LshEq)
            } else {
                self.make(TokenKind::Lsh)
            }
        } else {
            self.make(TokenKind::Lt)
        }
    }

    /// Lexes `>`, `>=`, `>>`, or `>>=`.
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Gte)
        } else if self.cursor.match_byte(b'>') {
            if self.cursor.match_byte(b'=') {
                self.make(TokenKind::RshEq)
            } else {
                self.make(TokenKind::Rsh)
            }
        } else {
            self.make(TokenKind::Gt)
        }
    }

    /// Lexes `^` (bitwise xor), `^=`, or `^^` (logical xor).
    pub(crate) fn lex_caret(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::XorEq)
        } else if self.cursor.match_byte(b'^') {
            self.make(TokenKind::Xor)
        } else {
            self.make(TokenKind::BitXor)
        }
    }

    /// Lexes `&`, `&&`, or `&=`.
    pub(crate) fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'&') {
            self.make(TokenKind::And)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::AndEq)
        } else {
            self.make(TokenKind::BitAnd)
        }
    }

    /// Lexes `|`, `||`, or `|=`.
    pub(crate) fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'|') {
            self.make(TokenKind::Or)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::OrEq)
        } else {
            self.make(TokenKind::BitOr)
        }
    }

    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Eq)
        } else {
            self.make(TokenKind::Assign)
        }
    }

    /// Lexes `!` or `!=`.
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Neq)
        } else {
            self.make(TokenKind::Not)
        }
    }

    /// Lexes `.`, `...`, or a numeric literal beginning with a dot.
    pub(crate) fn lex_dot(&mut self) -> LexResult<Token> {
        if self.cursor.peek(1).is_ascii_digit() {
            return self.lex_number();
        }
        self.cursor.advance();
        if self.cursor.current() == b'.' && self.cursor.peek(1) == b'.' {
            self.cursor.advance();
            self.cursor.advance();
            Ok(self.make(TokenKind::Ellipsis))
        } else {
            Ok(self.make(TokenKind::Dot))
        }
    }
}
