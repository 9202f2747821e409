//! Rendering a [`Span`] back into human-readable source context.

use crate::span::Span;

/// A slice of source text around a span, ready to print under a diagnostic.
///
/// Mirrors the shape of `faxc_util::diagnostic::SourceSnippet`: up to two
/// lines of context on either side of the offending line, the offending
/// line itself, and a caret line underneath it.
#[derive(Clone, Debug)]
pub struct SourceSnippet<'a> {
    source: &'a str,
    span: Span,
}

impl<'a> SourceSnippet<'a> {
    pub fn new(source: &'a str, span: Span) -> Self {
        Self { source, span }
    }

    /// Render the context, offending line, and caret underline.
    ///
    /// Output looks like:
    ///
    /// ```text
    ///   1 | [a]
    ///   2 | b = 1
    /// > 3 | b = 2
    ///       ^
    ///   4 | [c]
    /// ```
    pub fn format(&self) -> String {
        let lines: Vec<&str> = self.source.split('\n').collect();
        let target = self.span.line.saturating_sub(1) as usize;
        let first = target.saturating_sub(2);
        let last = (target + 2).min(lines.len().saturating_sub(1));

        let gutter_width = (last + 1).to_string().len();
        let mut out = String::new();

        for (idx, line) in lines.iter().enumerate().take(last + 1).skip(first) {
            let marker = if idx == target { '>' } else { ' ' };
            out.push_str(&format!(
                "{marker} {:>width$} | {line}\n",
                idx + 1,
                width = gutter_width,
                line = line.trim_end_matches('\r'),
            ));
            if idx == target {
                let caret_col = self.span.column.saturating_sub(1) as usize;
                let caret_len = self.caret_len(line);
                out.push_str(&" ".repeat(gutter_width + 3 + caret_col));
                out.push_str(&"^".repeat(caret_len.max(1)));
                out.push('\n');
            }
        }
        out
    }

    fn caret_len(&self, line: &str) -> usize {
        if self.span.is_empty() {
            return 1;
        }
        let col_start = self.span.column.saturating_sub(1) as usize;
        line.chars().count().saturating_sub(col_start).min(self.span.len()).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_points_at_column() {
        let source = "a = 1\nb = 2\nc = 3";
        let span = Span::new(6, 7, 2, 1);
        let rendered = SourceSnippet::new(source, span).format();
        assert!(rendered.contains("> 2 | b = 2"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn includes_surrounding_context() {
        let source = "1\n2\n3\n4\n5\n6\n7";
        let span = Span::new(0, 1, 4, 1);
        let rendered = SourceSnippet::new(source, span).format();
        assert!(rendered.contains("2 | 2"));
        assert!(rendered.contains("> 4 | 4"));
        assert!(rendered.contains("6 | 6"));
        assert!(!rendered.contains("1 | 1"));
        assert!(!rendered.contains("7 | 7"));
    }
}
