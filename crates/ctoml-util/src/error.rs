//! The two error shapes a parse can produce: a fatal [`ParseFailure`] and
//! a recorded [`Warning`].

use thiserror::Error;

use crate::diagnostic::DiagnosticKind;
use crate::span::Span;

/// A non-fatal diagnostic recorded in lenient mode.
///
/// Lenient parses that hit only recoverable conditions (duplicate keys,
/// duplicate tables, leading-zero integers) still succeed; their warnings
/// ride along with the parsed value instead of aborting the parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {} ({})", self.message, self.kind)
    }
}

/// The reason a parse could not complete, with enough context to print
/// a caret-underlined excerpt of the offending line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ParseFailure {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
    /// Pre-rendered source context; see [`crate::diagnostic::SourceSnippet`].
    pub snippet: String,
}

impl ParseFailure {
    /// The failure plus its rendered snippet, the way a caller printing
    /// to a terminal would want it.
    pub fn render(&self) -> String {
        format!("error: {}\n{}", self.message, self.snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_snippet() {
        let failure = ParseFailure {
            kind: DiagnosticKind::SyntaxError,
            span: Span::DUMMY,
            message: "unexpected token".to_string(),
            snippet: "  1 | x\n      ^\n".to_string(),
        };
        assert_eq!(failure.to_string(), "syntax error: unexpected token");
    }

    #[test]
    fn render_includes_snippet() {
        let failure = ParseFailure {
            kind: DiagnosticKind::SyntaxError,
            span: Span::DUMMY,
            message: "unexpected token".to_string(),
            snippet: "  1 | x\n      ^\n".to_string(),
        };
        assert!(failure.render().contains('^'));
    }
}
