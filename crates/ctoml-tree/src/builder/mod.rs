//! Tree construction: turns a token stream into a [`Document`], enforcing
//! the invariants the lexer can't see (duplicate keys, table re-opening,
//! inline-table immutability, array-of-tables pinning).
//!
//! Split by production, the way `faxc-par`'s `items`/`expr`/`stmt`/`types`
//! split a recursive-descent grammar:
//! - `paths` - the `PathSets` bookkeeping every other module consults
//! - `key` - dotted key parsing
//! - `table_header` - `[table]`
//! - `aot_header` - `[[array-of-tables]]`
//! - `value_parse` - scalar value tokens to [`crate::value::Value`]
//! - `inline_table` - `{ k = v, ... }`
//! - `array` - `[ v, v, ... ]`

mod aot_header;
mod array;
mod inline_table;
mod key;
mod table_header;
mod value_parse;

pub mod paths;

use ctoml_lex::{Lexer, Token, TokenKind};
use ctoml_util::{DiagnosticKind, Handler, ParseFailure};

use crate::value::Document;
use paths::PathSets;

/// Parses a validated TOML document into a [`Document`] plus whatever
/// warnings lenient mode collected.
pub struct Builder<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) handler: Handler<'a>,
    pub(crate) paths: PathSets,
    pub(crate) document: Document,
}

impl<'a> Builder<'a> {
    pub fn new(source: &'a str, strict: bool) -> Self {
        Self {
            lexer: Lexer::new(source),
            handler: Handler::new(source, strict),
            paths: PathSets::new(),
            document: Document::new(),
        }
    }

    /// Consume the full token stream and build the document tree.
    pub fn parse(mut self) -> Result<(Document, Vec<ctoml_util::Warning>), ParseFailure> {
        loop {
            let token = self.lexer.next_key_token()?;
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => continue,
                TokenKind::LeftBracket => self.parse_header()?,
                _ => self.parse_key_value_line(token)?,
            }
        }
        Ok((self.document, self.handler.into_warnings()))
    }

    fn parse_header(&mut self) -> Result<(), ParseFailure> {
        if self.lexer.peek_is('[') {
            self.parse_array_of_tables_header()
        } else {
            self.parse_table_header()
        }
    }

    fn parse_key_value_line(&mut self, first: Token) -> Result<(), ParseFailure> {
        let (segments, terminator) = self.parse_dotted_key(first)?;
        if terminator.kind != TokenKind::Equals {
            return Err(self.unexpected(&terminator, "expected '=' after key"));
        }
        let value = self.parse_value()?;
        self.assign(&segments, value)?;

        let structural = self.lexer.next_structural_token()?;
        match structural.kind {
            TokenKind::Newline | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(&structural, "expected newline after value")),
        }
    }

    pub(crate) fn unexpected(&self, token: &Token, message: &str) -> ParseFailure {
        self.handler.fatal(DiagnosticKind::SyntaxError, token.span, message.to_string())
    }
}

/// Parse a source document already known to be valid UTF-8 with no bare
/// control characters.
pub fn parse(source: &str, strict: bool) -> Result<(Document, Vec<ctoml_util::Warning>), ParseFailure> {
    Builder::new(source, strict).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn parses_flat_key_values() {
        let (doc, warnings) = parse("a = 1\nb = \"two\"\n", true).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(1)));
        assert_eq!(doc.root.get("b"), Some(&Value::String("two".to_string())));
    }

    #[test]
    fn parses_table_header() {
        let (doc, _) = parse("[a]\nb = 1\n", true).unwrap();
        let a = doc.root.get("a").unwrap().as_table().unwrap();
        assert_eq!(a.get("b"), Some(&Value::Integer(1)));
    }

    #[test]
    fn duplicate_key_is_fatal_in_strict_mode() {
        let err = parse("a = 1\na = 2\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::DuplicateKey);
    }

    #[test]
    fn duplicate_key_is_a_warning_in_lenient_mode_and_keeps_the_first_value() {
        let (doc, warnings) = parse("a = 1\na = 2\n", false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(1)));
    }
}
