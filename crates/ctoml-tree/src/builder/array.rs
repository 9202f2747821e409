//! `[ v, v, ... ]` array parsing.
//!
//! Elements may be any value, mixed types included; newlines between
//! elements, around commas, and before the closing `]` are all just
//! trivia, the same as inline tables.

use ctoml_lex::TokenKind;
use ctoml_util::ParseFailure;

use super::Builder;
use crate::value::Value;

impl<'a> Builder<'a> {
    /// The opening `[` has already been consumed by the caller.
    pub(crate) fn parse_array(&mut self) -> Result<Value, ParseFailure> {
        let mut elements = Vec::new();

        self.lexer.skip_newlines_and_trivia();
        if self.lexer.peek_is(']') {
            let close = self.lexer.next_structural_token()?;
            debug_assert_eq!(close.kind, TokenKind::RightBracket);
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            self.lexer.skip_newlines_and_trivia();
            let separator = self.lexer.next_structural_token()?;
            match separator.kind {
                TokenKind::RightBracket => break,
                TokenKind::Comma => {
                    self.lexer.skip_newlines_and_trivia();
                    if self.lexer.peek_is(']') {
                        let close = self.lexer.next_structural_token()?;
                        debug_assert_eq!(close.kind, TokenKind::RightBracket);
                        break; // trailing comma before close
                    }
                }
                _ => return Err(self.unexpected(&separator, "expected ',' or ']' in array")),
            }
        }

        Ok(Value::Array(elements))
    }
}
