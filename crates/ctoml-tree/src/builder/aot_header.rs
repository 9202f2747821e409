//! `[[array-of-tables]]` header parsing.

use ctoml_lex::TokenKind;
use ctoml_util::{DiagnosticKind, ParseFailure};

use super::paths::join_path;
use super::table_header::{check_prefixes_not_frozen, descend_header_segment};
use super::Builder;
use crate::value::{Table, Value};

impl<'a> Builder<'a> {
    /// The first `[` has already been consumed by the caller, which peeked
    /// a second one without consuming it; this consumes that second `[`,
    /// the dotted key, and the closing `]]`.
    pub(crate) fn parse_array_of_tables_header(&mut self) -> Result<(), ParseFailure> {
        let open = self.lexer.next_key_token()?;
        debug_assert_eq!(open.kind, TokenKind::LeftBracket);

        let first = self.lexer.next_key_token()?;
        let (segments, terminator) = self.parse_dotted_key(first)?;
        if terminator.kind != TokenKind::RightBracket {
            return Err(self.unexpected(&terminator, "expected ']' to close array-of-tables header"));
        }
        let close = self.lexer.next_key_token()?;
        if close.kind != TokenKind::RightBracket {
            return Err(self.unexpected(&close, "expected ']]' to close array-of-tables header"));
        }
        let structural = self.lexer.next_structural_token()?;
        if !matches!(structural.kind, TokenKind::Newline | TokenKind::Eof) {
            return Err(self.unexpected(&structural, "expected newline after array-of-tables header"));
        }

        let path_acc: Vec<String> = segments.iter().map(|(name, _)| name.clone()).collect();
        let path_str = join_path(&path_acc);
        let (name, span) = segments.last().expect("at least one segment").clone();

        check_prefixes_not_frozen(&segments, &self.paths, &self.handler)?;

        if self.paths.is_static_array_path(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::TypeConflict,
                span,
                format!("`{name}` is already defined as a plain array, not an array of tables"),
            ));
        }
        if self.paths.is_explicit_table(&path_str) && !self.paths.is_array_of_tables(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::TypeConflict,
                span,
                format!("`{name}` is already defined as a table, not an array of tables"),
            ));
        }
        if self.paths.is_dotted_table(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::DottedKeyConflict,
                span,
                format!("`{name}` was already defined by a dotted key"),
            ));
        }
        if self.paths.is_implicit_table_by_aot(&path_str) {
            return Err(self.handler.fatal(
                DiagnosticKind::TypeConflict,
                span,
                format!("`{name}` was already pinned as a table by a nested array of tables"),
            ));
        }

        // Every strict prefix (not the full path) becomes a plain table
        // pinned against ever becoming an array of tables itself.
        for prefix_len in 1..path_acc.len() {
            let prefix_str = join_path(&path_acc[..prefix_len]);
            if !self.paths.is_array_of_tables(&prefix_str) {
                self.paths.mark_implicit_table_by_aot(prefix_str);
            }
        }
        self.paths.mark_array_of_tables(path_str.clone());
        self.paths.clear_inline_frozen_under(&path_str);

        let mut table: &mut Table = &mut self.document.root;
        let mut nav_path: Vec<String> = Vec::new();
        for (seg_name, seg_span) in &segments[..segments.len() - 1] {
            nav_path.push(seg_name.clone());
            let nav_path_str = join_path(&nav_path);
            let (next_table, _existed) =
                descend_header_segment(table, seg_name, *seg_span, &nav_path_str, &mut self.paths, &self.handler)?;
            table = next_table;
        }

        let entry = table.entry(name.clone()).or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(arr) => arr.push(Value::Table(Table::new())),
            other => {
                return Err(self.handler.fatal(
                    DiagnosticKind::TypeConflict,
                    span,
                    format!("`{name}` is already a {}, not an array of tables", other.type_name()),
                ))
            }
        }

        self.paths.set_current_path(path_acc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::value::Value;
    use ctoml_util::DiagnosticKind;

    #[test]
    fn repeated_array_of_tables_header_appends_elements() {
        let (doc, _) = parse("[[fruits]]\nname = \"apple\"\n[[fruits]]\nname = \"banana\"\n", true).unwrap();
        let fruits = doc.root.get("fruits").unwrap().as_array().unwrap();
        assert_eq!(fruits.len(), 2);
        assert_eq!(fruits[0].as_table().unwrap().get("name"), Some(&Value::String("apple".to_string())));
        assert_eq!(fruits[1].as_table().unwrap().get("name"), Some(&Value::String("banana".to_string())));
    }

    #[test]
    fn nested_array_of_tables_descends_into_last_element() {
        let source = "[[fruits]]\nname = \"apple\"\n[[fruits.variety]]\nname = \"red delicious\"\n[[fruits]]\nname = \"banana\"\n[[fruits.variety]]\nname = \"plantain\"\n";
        let (doc, _) = parse(source, true).unwrap();
        let fruits = doc.root.get("fruits").unwrap().as_array().unwrap();
        assert_eq!(fruits.len(), 2);
        let apple_variety = fruits[0].as_table().unwrap().get("variety").unwrap().as_array().unwrap();
        assert_eq!(apple_variety.len(), 1);
        assert_eq!(
            apple_variety[0].as_table().unwrap().get("name"),
            Some(&Value::String("red delicious".to_string()))
        );
        let banana_variety = fruits[1].as_table().unwrap().get("variety").unwrap().as_array().unwrap();
        assert_eq!(
            banana_variety[0].as_table().unwrap().get("name"),
            Some(&Value::String("plantain".to_string()))
        );
    }

    #[test]
    fn array_of_tables_cannot_reopen_a_plain_table() {
        let err = parse("[a]\nx = 1\n[[a]]\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::TypeConflict);
    }

    #[test]
    fn array_of_tables_cannot_redeclare_a_plain_array_literal() {
        let err = parse("a = [1, 2, 3]\n[[a]]\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::TypeConflict);
    }

    #[test]
    fn nested_array_of_tables_pins_its_parent_against_becoming_one() {
        // `[[a.b]]` pins `a` as a plain table; `[[a]]` then conflicts.
        let err = parse("[[a.b]]\n[[a]]\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::TypeConflict);
    }

    #[test]
    fn key_values_after_header_land_in_the_latest_element() {
        let (doc, _) = parse("[[a]]\nx = 1\n[[a]]\nx = 2\ny = 3\n", true).unwrap();
        let a = doc.root.get("a").unwrap().as_array().unwrap();
        assert_eq!(a[0].as_table().unwrap().get("x"), Some(&Value::Integer(1)));
        assert_eq!(a[1].as_table().unwrap().get("x"), Some(&Value::Integer(2)));
        assert_eq!(a[1].as_table().unwrap().get("y"), Some(&Value::Integer(3)));
    }
}
