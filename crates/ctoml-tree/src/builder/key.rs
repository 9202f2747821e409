//! Dotted key parsing and key-path assignment into the value tree.

use ctoml_lex::{Token, TokenKind};
use ctoml_util::{DiagnosticKind, Handler, ParseFailure, Span};

use super::paths::{join_path, PathSets};
use super::table_header::descend_header_segment;
use super::Builder;
use crate::value::{Table, Value};

/// A parsed key segment: its resolved text plus where it was written,
/// for diagnostics that point at the exact duplicate, not the whole line.
pub(crate) type KeySegment = (String, Span);

impl<'a> Builder<'a> {
    /// Parses `a.b.c` starting from an already-consumed first segment
    /// token, returning every segment plus whichever non-`.` token ended
    /// the chain (an `=` for a key/value line, a `]`/`]]` for a header).
    pub(crate) fn parse_dotted_key(&mut self, first: Token) -> Result<(Vec<KeySegment>, Token), ParseFailure> {
        let mut segments = vec![self.key_segment(&first)?];
        loop {
            let next = self.lexer.next_key_token()?;
            if next.kind == TokenKind::Dot {
                let segment_token = self.lexer.next_key_token()?;
                segments.push(self.key_segment(&segment_token)?);
            } else {
                return Ok((segments, next));
            }
        }
    }

    fn key_segment(&self, token: &Token) -> Result<KeySegment, ParseFailure> {
        match token.kind {
            TokenKind::BareKey | TokenKind::BasicString | TokenKind::LiteralString => {
                Ok((token.lexeme.clone(), token.span))
            }
            _ => Err(self.unexpected(token, "expected a key")),
        }
    }

    /// Assigns `value` at `segments`, relative to the table the most
    /// recent header opened (`self.paths.current_path`).
    pub(crate) fn assign(&mut self, segments: &[KeySegment], value: Value) -> Result<(), ParseFailure> {
        let mut path_acc: Vec<String> = Vec::new();
        let mut table: &mut Table = &mut self.document.root;
        for seg in self.paths.current_path.clone() {
            path_acc.push(seg.clone());
            let path_str = join_path(&path_acc);
            let (next_table, _existed) =
                descend_header_segment(table, &seg, Span::DUMMY, &path_str, &mut self.paths, &self.handler)?;
            table = next_table;
        }
        assign_into(table, &mut self.paths, path_acc, segments, value, &self.handler)
    }
}

/// The dotted-key assignment rule (§4.3.2), factored out so an inline
/// table's entries (`inline_table.rs`) can run it against a freshly
/// allocated local table and a fresh, scoped-to-that-literal
/// [`PathSets`], instead of the document's own.
///
/// Creates intermediate tables for any dotted segment that doesn't exist
/// yet, marking each as implicit so a later `[header]` may still
/// complete it exactly once — but never lets a dotted key reach into a
/// table an explicit header already owns. If `value` is itself a table
/// (which, coming out of `Builder::parse_value`, only ever means an
/// inline table literal — headers never produce a `Value` this way),
/// the whole inserted subtree is frozen against further mutation.
pub(super) fn assign_into(
    table_root: &mut Table,
    paths: &mut PathSets,
    mut path_acc: Vec<String>,
    segments: &[KeySegment],
    value: Value,
    handler: &Handler,
) -> Result<(), ParseFailure> {
    let mut table: &mut Table = table_root;

    for (name, span) in &segments[..segments.len() - 1] {
        path_acc.push(name.clone());
        let path_str = join_path(&path_acc);
        if paths.is_inline_frozen(&path_str) {
            return Err(handler.fatal(
                DiagnosticKind::InlineTableImmutability,
                *span,
                format!("cannot extend into `{name}`, its table is inline and closed"),
            ));
        }
        if paths.is_explicit_table(&path_str) {
            return Err(handler.fatal(
                DiagnosticKind::DottedKeyConflict,
                *span,
                format!("`{name}` is defined by a table header, a dotted key cannot extend into it"),
            ));
        }
        let existed = table.contains_key(name);
        let entry = table.entry(name.clone()).or_insert_with(|| Value::Table(Table::new()));
        if !existed {
            paths.mark_dotted_table(path_str);
        }
        table = match entry {
            Value::Table(t) => t,
            other => {
                return Err(handler.fatal(
                    DiagnosticKind::TypeConflict,
                    *span,
                    format!("`{name}` is already a {}, not a table", other.type_name()),
                ))
            }
        };
    }

    let (name, span) = segments.last().expect("at least one segment");
    path_acc.push(name.clone());
    let leaf_path = join_path(&path_acc);

    if paths.is_inline_frozen(&leaf_path) {
        return Err(handler.fatal(
            DiagnosticKind::InlineTableImmutability,
            *span,
            format!("cannot assign `{name}`, its table is inline and closed"),
        ));
    }

    let assigned_before = paths.is_key_assigned(&leaf_path);
    if !assigned_before && table.contains_key(name) {
        return Err(handler.fatal(
            DiagnosticKind::TypeConflict,
            *span,
            format!("`{name}` is already defined as a {}", table.get(name).unwrap().type_name()),
        ));
    }
    if assigned_before {
        handler.recoverable(DiagnosticKind::DuplicateKey, *span, format!("duplicate key `{name}`"))?;
        // Lenient mode keeps the first value; the new one is discarded.
        return Ok(());
    }
    paths.mark_key_assigned(leaf_path.clone());

    if matches!(value, Value::Table(_)) {
        freeze_subtree(paths, path_acc.clone(), &value);
    }
    if matches!(value, Value::Array(_)) {
        paths.mark_static_array_path(leaf_path);
    }
    table.insert(name.clone(), value);
    Ok(())
}

/// Marks `prefix` and, recursively, every nested-table descendant of
/// `value` as inline-frozen. Only ever called with a `value` that came
/// from inline-table syntax (the sole source of a bare `Value::Table` in
/// a value position), so every path it marks really was closed by a `}`.
pub(super) fn freeze_subtree(paths: &mut PathSets, prefix: Vec<String>, value: &Value) {
    paths.mark_inline_frozen(join_path(&prefix));
    if let Value::Table(t) = value {
        for (key, child) in t {
            let mut child_path = prefix.clone();
            child_path.push(key.clone());
            freeze_subtree(paths, child_path, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::value::Value;
    use ctoml_util::DiagnosticKind;

    #[test]
    fn dotted_key_creates_nested_tables() {
        let (doc, _) = parse("a.b.c = 1\n", true).unwrap();
        let a = doc.root.get("a").unwrap().as_table().unwrap();
        let b = a.get("b").unwrap().as_table().unwrap();
        assert_eq!(b.get("c"), Some(&Value::Integer(1)));
    }

    #[test]
    fn duplicate_dotted_key_is_fatal_in_strict_mode() {
        let err = parse("a.b = 1\na.b = 2\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::DuplicateKey);
    }

    #[test]
    fn assigning_a_scalar_over_an_implicit_dotted_table_is_a_type_conflict() {
        let err = parse("a.b = 1\na = 2\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::TypeConflict);
    }
}
