//! Routes diagnostics to either a hard failure or the warning list,
//! depending on strictness.

use crate::diagnostic::kind::DiagnosticKind;
use crate::diagnostic::snippet::SourceSnippet;
use crate::error::{ParseFailure, Warning};
use crate::span::Span;

/// Accumulates warnings and decides, per strictness mode, whether a
/// recoverable diagnostic aborts the parse.
///
/// Unconditionally-fatal diagnostics (`SyntaxError`, `TypeConflict`, …) do
/// not go through this handler at all — callers build a [`ParseFailure`]
/// directly and return it, the same way `faxc_lex`/`faxc_par` bail out of
/// their recursive-descent loops on a hard error instead of asking a
/// handler whether to continue.
#[derive(Debug)]
pub struct Handler<'a> {
    source: &'a str,
    strict: bool,
    warnings: Vec<Warning>,
}

impl<'a> Handler<'a> {
    pub fn new(source: &'a str, strict: bool) -> Self {
        Self {
            source,
            strict,
            warnings: Vec::new(),
        }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Report a diagnostic that is only ever fatal in strict mode
    /// (`DuplicateKey`, `DuplicateTable`, or a leading-zero `InvalidNumber`).
    ///
    /// In strict mode this returns `Err`, carrying a fully rendered
    /// snippet. In lenient mode it pushes a [`Warning`] and returns `Ok`,
    /// so the builder can keep going (e.g. the later value wins a
    /// duplicate key).
    pub fn recoverable(
        &mut self,
        kind: DiagnosticKind,
        span: Span,
        message: impl Into<String>,
    ) -> Result<(), ParseFailure> {
        let message = message.into();
        if self.strict {
            Err(self.fatal(kind, span, message))
        } else {
            self.warnings.push(Warning { kind, span, message });
            Ok(())
        }
    }

    /// Build a fatal [`ParseFailure`] with a rendered snippet attached.
    /// Always returns `Err`-shaped data; callers still choose when to
    /// propagate it.
    pub fn fatal(&self, kind: DiagnosticKind, span: Span, message: impl Into<String>) -> ParseFailure {
        let snippet = SourceSnippet::new(self.source, span).format();
        ParseFailure {
            kind,
            span,
            message: message.into(),
            snippet,
        }
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_mode_warns_instead_of_failing() {
        let mut handler = Handler::new("a = 1\na = 2", false);
        let span = Span::new(6, 7, 2, 1);
        let result = handler.recoverable(DiagnosticKind::DuplicateKey, span, "duplicate key `a`");
        assert!(result.is_ok());
        assert_eq!(handler.warnings().len(), 1);
    }

    #[test]
    fn strict_mode_fails_immediately() {
        let mut handler = Handler::new("a = 1\na = 2", true);
        let span = Span::new(6, 7, 2, 1);
        let result = handler.recoverable(DiagnosticKind::DuplicateKey, span, "duplicate key `a`");
        assert!(result.is_err());
        assert!(handler.warnings().is_empty());
    }

    #[test]
    fn fatal_carries_a_rendered_snippet() {
        let handler = Handler::new("a = @", true);
        let failure = handler.fatal(DiagnosticKind::UnexpectedCharacter, Span::point(4, 1, 5), "stray `@`");
        assert!(failure.snippet.contains('^'));
    }
}
