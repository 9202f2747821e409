//! Date/time lexeme recognition.
//!
//! Shape only: the lexer consumes the longest run matching one of the four
//! RFC 3339-derived forms and tags it with the matching [`TokenKind`]. Field
//! range validation (month 1-12, leap seconds, offset range) happens in the
//! tree builder's value parser, which has the full lexeme and can build a
//! precise diagnostic.

use ctoml_util::DiagnosticKind;

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};
use ctoml_util::ParseFailure;

impl<'a> Lexer<'a> {
    pub(super) fn lex_datetime(&mut self) -> Result<Token, ParseFailure> {
        let has_date = self.cursor.peek_byte(4) == Some(b'-');
        if has_date {
            self.consume_digits_exact(4)?;
            self.expect_byte(b'-')?;
            self.consume_digits_exact(2)?;
            self.expect_byte(b'-')?;
            self.consume_digits_exact(2)?;

            let has_time = matches!(self.cursor.current_char(), 'T' | 't' | ' ')
                && self.cursor.peek_byte(1).map(|b| b.is_ascii_digit()).unwrap_or(false);
            if !has_time {
                return Ok(self.make(TokenKind::LocalDate));
            }
            self.cursor.advance();
            self.lex_time_body()?;
            let has_offset = self.lex_offset_if_present();
            return Ok(self.make(if has_offset { TokenKind::OffsetDateTime } else { TokenKind::LocalDateTime }));
        }

        self.lex_time_body()?;
        Ok(self.make(TokenKind::LocalTime))
    }

    /// `HH:MM`, with `:SS` optional (1.1.0 drops the mandatory seconds
    /// field) and a fractional-second suffix only possible when seconds
    /// were actually present.
    fn lex_time_body(&mut self) -> Result<(), ParseFailure> {
        self.consume_digits_exact(2)?;
        self.expect_byte(b':')?;
        self.consume_digits_exact(2)?;
        if self.cursor.peek_byte(0) == Some(b':') {
            self.cursor.advance();
            self.consume_digits_exact(2)?;
            if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
                self.cursor.advance();
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }
        Ok(())
    }

    /// Consumes a trailing `Z`/`z` or `+HH:MM`/`-HH:MM` offset, if present.
    /// Returns whether one was found.
    fn lex_offset_if_present(&mut self) -> bool {
        match self.cursor.current_char() {
            'Z' | 'z' => {
                self.cursor.advance();
                true
            }
            '+' | '-' => {
                self.cursor.advance();
                let _ = self.consume_digits_exact(2);
                let _ = self.expect_byte(b':');
                let _ = self.consume_digits_exact(2);
                true
            }
            _ => false,
        }
    }

    fn consume_digits_exact(&mut self, count: usize) -> Result<(), ParseFailure> {
        for _ in 0..count {
            if !self.cursor.current_char().is_ascii_digit() {
                return Err(self.error(DiagnosticKind::InvalidDateTime, "malformed date/time literal"));
            }
            self.cursor.advance();
        }
        Ok(())
    }

    fn expect_byte(&mut self, expected: u8) -> Result<(), ParseFailure> {
        if self.cursor.peek_byte(0) != Some(expected) {
            return Err(self.error(
                DiagnosticKind::InvalidDateTime,
                format!("expected '{}' in date/time literal", expected as char),
            ));
        }
        self.cursor.advance();
        Ok(())
    }
}
