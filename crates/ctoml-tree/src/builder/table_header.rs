//! `[table]` header parsing, plus the segment-navigation helper shared
//! with `[[array-of-tables]]` headers.

use ctoml_lex::TokenKind;
use ctoml_util::{DiagnosticKind, Handler, ParseFailure, Span};

use super::paths::{join_path, PathSets};
use super::Builder;
use crate::value::{Table, Value};

impl<'a> Builder<'a> {
    /// The opening `[` has already been consumed by the caller (and found
    /// not to be followed by a second `[`).
    pub(crate) fn parse_table_header(&mut self) -> Result<(), ParseFailure> {
        let first = self.lexer.next_key_token()?;
        let (segments, terminator) = self.parse_dotted_key(first)?;
        if terminator.kind != TokenKind::RightBracket {
            return Err(self.unexpected(&terminator, "expected ']' to close table header"));
        }
        let structural = self.lexer.next_structural_token()?;
        if !matches!(structural.kind, TokenKind::Newline | TokenKind::Eof) {
            return Err(self.unexpected(&structural, "expected newline after table header"));
        }

        let path_acc: Vec<String> = segments.iter().map(|(name, _)| name.clone()).collect();
        let path_str = join_path(&path_acc);
        let span = segments.last().expect("at least one segment").1;

        check_prefixes_not_frozen(&segments, &self.paths, &self.handler)?;

        if self.paths.is_array_of_tables(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::TypeConflict,
                span,
                format!("`{}` is already defined as an array of tables", path_acc.last().unwrap()),
            ));
        }
        if self.paths.is_dotted_table(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::DottedKeyConflict,
                span,
                format!("`{}` was already defined by a dotted key", path_acc.last().unwrap()),
            ));
        }
        if self.paths.is_explicit_table(&path_str) {
            self.handler.recoverable(
                DiagnosticKind::DuplicateTable,
                span,
                format!("table `{}` is defined more than once", path_acc.last().unwrap()),
            )?;
        } else {
            self.paths.mark_explicit_table(path_str);
        }

        let mut table: &mut Table = &mut self.document.root;
        let mut nav_path: Vec<String> = Vec::new();
        for (name, seg_span) in &segments {
            nav_path.push(name.clone());
            let nav_path_str = join_path(&nav_path);
            let (next_table, _existed) =
                descend_header_segment(table, name, *seg_span, &nav_path_str, &mut self.paths, &self.handler)?;
            table = next_table;
        }

        self.paths.set_current_path(path_acc);
        Ok(())
    }
}

/// Every prefix of `segments` (including the full path) must not fall
/// under a closed inline table.
pub(super) fn check_prefixes_not_frozen(
    segments: &[(String, Span)],
    paths: &PathSets,
    handler: &Handler,
) -> Result<(), ParseFailure> {
    let mut prefix: Vec<String> = Vec::new();
    for (name, span) in segments {
        prefix.push(name.clone());
        let prefix_str = join_path(&prefix);
        if paths.is_inline_frozen(&prefix_str) {
            return Err(handler.fatal(
                DiagnosticKind::InlineTableImmutability,
                *span,
                format!("cannot open `{name}`, its table is inline and closed"),
            ));
        }
    }
    Ok(())
}

/// Descends one header-path segment, creating a table entry if it is
/// new. If the segment names an existing array-of-tables, descends into
/// that array's most recently appended element instead of treating the
/// entry itself as a table — the shape `[[fruits]]` / `[[fruits.variety]]`
/// requires.
pub(super) fn descend_header_segment<'t>(
    table: &'t mut Table,
    name: &str,
    span: Span,
    path_str: &str,
    paths: &mut PathSets,
    handler: &Handler,
) -> Result<(&'t mut Table, bool), ParseFailure> {
    if paths.is_inline_frozen(path_str) {
        return Err(handler.fatal(
            DiagnosticKind::InlineTableImmutability,
            span,
            format!("cannot open `{name}`, its table is inline and closed"),
        ));
    }

    let existed = table.contains_key(name);
    let is_array = paths.is_array_of_tables(path_str);
    let entry = table.entry(name.to_string()).or_insert_with(|| {
        if is_array {
            Value::Array(vec![Value::Table(Table::new())])
        } else {
            Value::Table(Table::new())
        }
    });

    let next = match entry {
        Value::Table(t) => t,
        Value::Array(arr) if is_array => arr
            .last_mut()
            .expect("array-of-tables always has at least one element")
            .as_table_mut()
            .expect("array-of-tables elements are always tables"),
        other => {
            return Err(handler.fatal(
                DiagnosticKind::TypeConflict,
                span,
                format!("`{name}` is already a {}, not a table", other.type_name()),
            ))
        }
    };
    Ok((next, existed))
}
