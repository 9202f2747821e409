//! Public entry point: validate, tokenize, and build a TOML document tree
//! in one call.
//!
//! Plays the role the library half of `faxc-drv` plays for the compiler
//! this workspace is shaped after — the thing a caller actually links
//! against — except there is no further lowering pipeline downstream and
//! no CLI binary; a parsed [`Document`] is the end product, not an
//! intermediate representation on the way to one.

pub use ctoml_tree::{DateTimeValue, Document, Table, Value};
pub use ctoml_util::{DiagnosticKind, ParseFailure, Warning};

/// The whole configuration surface: whether a recoverable semantic
/// violation (duplicate key, duplicate table, leading-zero numeral)
/// fails the parse or is downgraded to a warning and worked around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub strict: bool,
}

impl ParserConfig {
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    pub const fn lenient() -> Self {
        Self { strict: false }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::strict()
    }
}

/// Validates, tokenizes, and builds `source` into a [`Document`].
///
/// On success, returns the tree plus any warnings lenient mode collected
/// (always empty in strict mode, since every recoverable violation would
/// instead have failed the parse). On failure, returns the single
/// [`ParseFailure`] that stopped the pipeline — from source validation,
/// tokenization, or tree construction, whichever ran first.
pub fn parse(source: &str, config: ParserConfig) -> Result<(Document, Vec<Warning>), ParseFailure> {
    let validated = ctoml_lex::validate(source.as_bytes())?;
    ctoml_tree::parse(validated, config.strict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let (doc, warnings) = parse("title = \"hi\"\n", ParserConfig::strict()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(doc.root.get("title"), Some(&Value::String("hi".to_string())));
    }

    #[test]
    fn rejects_invalid_utf8_before_tokenizing() {
        let bytes: &[u8] = &[b'a', b'=', b' ', 0xFF, b'\n'];
        let source = std::str::from_utf8(bytes);
        assert!(source.is_err());
        // ctoml_lex::validate is exercised directly here since `parse`
        // takes an already-owned `&str`, which can't hold invalid UTF-8.
        let err = ctoml_lex::validate(bytes).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InvalidEncoding);
    }

    #[test]
    fn default_config_is_strict() {
        assert!(ParserConfig::default().strict);
        assert!(!ParserConfig::lenient().strict);
    }
}
