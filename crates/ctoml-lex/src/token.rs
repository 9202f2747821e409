//! The token alphabet the tree builder consumes.

use ctoml_util::Span;

/// The shape a lexeme was recognized as.
///
/// String variants carry their *processed* content (escapes resolved,
/// multiline leading-newline and line-ending-backslash rules applied);
/// `Integer`/`Float`/datetime variants carry the raw lexeme text and are
/// only given numeric/temporal meaning later, in the tree builder's value
/// parsing stage — the tokenizer's job stops at recognizing the shape and
/// validating lexical rules (underscore placement, digit grouping).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A newline; significant in TOML, unlike most grammars, since it ends
    /// a key/value pair.
    Newline,
    Equals,
    Dot,
    Comma,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    BareKey,
    BasicString,
    LiteralString,
    MultilineBasicString,
    MultilineLiteralString,
    Integer,
    Float,
    Boolean,
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Eof,
}

impl TokenKind {
    pub const fn is_string(&self) -> bool {
        matches!(
            self,
            TokenKind::BasicString
                | TokenKind::LiteralString
                | TokenKind::MultilineBasicString
                | TokenKind::MultilineLiteralString
        )
    }

    pub const fn is_value_start(&self) -> bool {
        matches!(
            self,
            TokenKind::BasicString
                | TokenKind::LiteralString
                | TokenKind::MultilineBasicString
                | TokenKind::MultilineLiteralString
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Boolean
                | TokenKind::OffsetDateTime
                | TokenKind::LocalDateTime
                | TokenKind::LocalDate
                | TokenKind::LocalTime
                | TokenKind::LeftBracket
                | TokenKind::LeftBrace
        )
    }
}

/// A single lexical token: its category, the text backing it, and its
/// location in the source document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn column(&self) -> u32 {
        self.span.column
    }
}
