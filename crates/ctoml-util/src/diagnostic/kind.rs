//! The closed set of diagnostic kinds a conforming parse can raise.
//!
//! This plays the role `faxc_util::diagnostic::DiagnosticCode` plays for the
//! teacher compiler, except the kind tag itself carries the meaning — there
//! is no parallel numeric code scheme layered on top, since the spec's
//! twelve-variant taxonomy already is the code (see DESIGN.md).

use std::fmt;

/// Identifies the category of a [`crate::Warning`] or
/// [`crate::ParseFailure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed UTF-8, a bare control character, or a stray `\r`.
    InvalidEncoding,
    /// A byte does not begin any valid token.
    UnexpectedCharacter,
    /// End of input reached inside a string literal.
    UnterminatedString,
    /// Unknown/incomplete escape sequence, or an escape to an invalid
    /// code point (surrogate, above U+10FFFF).
    InvalidEscape,
    /// Malformed integer or float literal.
    InvalidNumber,
    /// Out-of-range date/time component or malformed timezone offset.
    InvalidDateTime,
    /// The token sequence violates the grammar.
    SyntaxError,
    /// A key is written twice in the same table or inline table.
    DuplicateKey,
    /// A `[t]` header re-opens a previously defined table.
    DuplicateTable,
    /// A path collides across value kinds (table vs. array vs. scalar;
    /// array-of-tables vs. plain table).
    TypeConflict,
    /// An attempt to extend a path inside a closed inline table.
    InlineTableImmutability,
    /// An implicit-dotted table was targeted by an explicit header, or a
    /// dotted write crossed into a header-defined table from outside its
    /// context.
    DottedKeyConflict,
    /// Reserved for the façade's file-reading layer; the CORE parser never
    /// raises this itself (see DESIGN.md).
    IoError,
}

impl DiagnosticKind {
    /// Kinds that always fail the parse, even in lenient mode (spec §7).
    ///
    /// `DuplicateKey`, `DuplicateTable`, and the leading-zero variant of
    /// `InvalidNumber` are the exceptions, and they are recoverable by
    /// *condition*, not by kind alone — callers route those through
    /// [`crate::diagnostic::Handler::recoverable`] instead of checking
    /// this predicate. Every other kind goes through this gate.
    #[inline]
    pub const fn always_fatal(&self) -> bool {
        !matches!(self, DiagnosticKind::DuplicateKey | DiagnosticKind::DuplicateTable)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidEncoding => "invalid encoding",
            DiagnosticKind::UnexpectedCharacter => "unexpected character",
            DiagnosticKind::UnterminatedString => "unterminated string",
            DiagnosticKind::InvalidEscape => "invalid escape",
            DiagnosticKind::InvalidNumber => "invalid number",
            DiagnosticKind::InvalidDateTime => "invalid date/time",
            DiagnosticKind::SyntaxError => "syntax error",
            DiagnosticKind::DuplicateKey => "duplicate key",
            DiagnosticKind::DuplicateTable => "duplicate table",
            DiagnosticKind::TypeConflict => "type conflict",
            DiagnosticKind::InlineTableImmutability => "inline table is immutable",
            DiagnosticKind::DottedKeyConflict => "dotted key conflict",
            DiagnosticKind::IoError => "I/O error",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
