//! Whitespace and comment skipping.
//!
//! Runs before every token dispatch, so `//` and `/*` are consumed here and
//! a leading `/*` is never reinterpreted as `/` followed by `*`.

use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments until the next token byte.
    ///
    /// Tab, carriage return, and space are skipped; newlines advance the
    /// line counter through the cursor. Reaching end of input inside a block
    /// comment is fatal.
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> LexResult<()> {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                },
                b'/' if self.cursor.peek(1) == b'/' => {
                    self.skip_line_comment();
                },
                b'/' if self.cursor.peek(1) == b'*' => {
                    self.skip_block_comment()?;
                },
                _ => return Ok(()),
            }
        }
    }

    /// Skips a `//` comment through (not including) the next newline.
    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
    }

    /// Skips a `/* ... */` comment, including the closing delimiter.
    ///
    /// Block comments do not nest.
    fn skip_block_comment(&mut self) -> LexResult<()> {
        self.token_start = self.cursor.position();
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current() == b'*' && self.cursor.peek(1) == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }

        Err(crate::LexError {
            message: "unterminated block comment".to_string(),
            span: thcc_util::Span::new(
                self.token_start,
                self.cursor.position(),
                start_line,
                start_column,
            ),
        })
    }
}
