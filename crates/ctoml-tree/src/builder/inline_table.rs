//! `{ k = v, ... }` inline table parsing.
//!
//! TOML 1.1.0 permits newlines anywhere inside an inline table, unlike
//! every other production here; this is the one place the builder has
//! to explicitly swallow them rather than treat them as a line
//! terminator.

use ctoml_lex::{Token, TokenKind};
use ctoml_util::ParseFailure;

use super::key::assign_into;
use super::paths::PathSets;
use super::Builder;
use crate::value::{Table, Value};

impl<'a> Builder<'a> {
    /// The opening `{` has already been consumed by the caller.
    pub(crate) fn parse_inline_table(&mut self) -> Result<Value, ParseFailure> {
        let mut table = Table::new();
        // Scoped to this one literal: forbids a later entry in the same
        // inline table from dotting into a table an earlier entry in it
        // already closed, without polluting the document's own paths.
        let mut local_paths = PathSets::new();

        let mut next = self.skip_inline_newlines()?;
        if next.kind == TokenKind::RightBrace {
            return Ok(Value::Table(table));
        }

        loop {
            let (segments, mut terminator) = self.parse_dotted_key(next)?;
            if terminator.kind == TokenKind::Newline {
                terminator = self.skip_inline_newlines()?;
            }
            if terminator.kind != TokenKind::Equals {
                return Err(self.unexpected(&terminator, "expected '=' in inline table entry"));
            }
            let value = self.parse_value()?;
            assign_into(&mut table, &mut local_paths, Vec::new(), &segments, value, &self.handler)?;

            let separator = self.skip_inline_newlines_structural()?;
            match separator.kind {
                TokenKind::RightBrace => break,
                TokenKind::Comma => {
                    let after_comma = self.skip_inline_newlines()?;
                    if after_comma.kind == TokenKind::RightBrace {
                        break; // trailing comma before close
                    }
                    next = after_comma;
                }
                _ => return Err(self.unexpected(&separator, "expected ',' or '}' in inline table")),
            }
        }

        Ok(Value::Table(table))
    }

    fn skip_inline_newlines(&mut self) -> Result<Token, ParseFailure> {
        self.lexer.skip_newlines_and_trivia();
        self.lexer.next_key_token()
    }

    fn skip_inline_newlines_structural(&mut self) -> Result<Token, ParseFailure> {
        self.lexer.skip_newlines_and_trivia();
        self.lexer.next_structural_token()
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::value::Value;
    use ctoml_util::DiagnosticKind;

    #[test]
    fn parses_flat_inline_table() {
        let (doc, _) = parse("t = { a = 1, b = 2 }\n", true).unwrap();
        let t = doc.root.get("t").unwrap().as_table().unwrap();
        assert_eq!(t.get("a"), Some(&Value::Integer(1)));
        assert_eq!(t.get("b"), Some(&Value::Integer(2)));
    }

    #[test]
    fn empty_inline_table() {
        let (doc, _) = parse("t = {}\n", true).unwrap();
        assert_eq!(doc.root.get("t"), Some(&Value::Table(crate::value::Table::new())));
    }

    #[test]
    fn trailing_comma_is_accepted() {
        let (doc, _) = parse("t = { a = 1, }\n", true).unwrap();
        assert_eq!(doc.root.get("t").unwrap().as_table().unwrap().get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn newline_inside_inline_table_is_permitted() {
        let (doc, _) = parse("t = {\n  a = 1,\n  b = 2\n}\n", true).unwrap();
        let t = doc.root.get("t").unwrap().as_table().unwrap();
        assert_eq!(t.get("a"), Some(&Value::Integer(1)));
        assert_eq!(t.get("b"), Some(&Value::Integer(2)));
    }

    #[test]
    fn inline_table_is_frozen_after_close() {
        let err = parse("t = { a = 1 }\nt.b = 2\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InlineTableImmutability);
    }

    #[test]
    fn duplicate_key_within_one_inline_table_is_fatal() {
        let err = parse("t = { a = 1, a = 2 }\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::DuplicateKey);
    }

    #[test]
    fn sibling_entry_cannot_dot_into_an_earlier_nested_inline_table() {
        let err = parse("t = { a = { x = 1 }, a.y = 2 }\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InlineTableImmutability);
    }

    #[test]
    fn dotted_keys_inside_an_inline_table_build_nested_tables() {
        let (doc, _) = parse("t = { a.b = 1, a.c = 2 }\n", true).unwrap();
        let a = doc.root.get("t").unwrap().as_table().unwrap().get("a").unwrap().as_table().unwrap();
        assert_eq!(a.get("b"), Some(&Value::Integer(1)));
        assert_eq!(a.get("c"), Some(&Value::Integer(2)));
    }
}
