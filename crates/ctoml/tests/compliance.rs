//! End-to-end scenarios, verbatim from the worked examples: each exercises
//! the full validate → tokenize → build pipeline through the public
//! `ctoml::parse` entry point rather than any one crate in isolation.

use ctoml::{DiagnosticKind, ParserConfig, Value};

#[test]
fn scenario_1_basic_table() {
    let (doc, warnings) = ctoml::parse("title = \"hi\"\n[db]\nport = 5432\n", ParserConfig::strict()).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(doc.root.get("title"), Some(&Value::String("hi".to_string())));
    let db = doc.root.get("db").unwrap().as_table().unwrap();
    assert_eq!(db.get("port"), Some(&Value::Integer(5432)));
}

#[test]
fn scenario_2_dotted_then_header_is_a_conflict() {
    let err = ctoml::parse("a.b = 1\n[a]\nc = 2\n", ParserConfig::strict()).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::DottedKeyConflict);
    assert_eq!(err.span.line, 2);
}

#[test]
fn scenario_3_array_of_tables() {
    let (doc, _) = ctoml::parse("[[p]]\nn=\"a\"\n[[p]]\nn=\"b\"\n", ParserConfig::strict()).unwrap();
    let p = doc.root.get("p").unwrap().as_array().unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p[0].as_table().unwrap().get("n"), Some(&Value::String("a".to_string())));
    assert_eq!(p[1].as_table().unwrap().get("n"), Some(&Value::String("b".to_string())));
}

#[test]
fn scenario_4_inline_table_immutability() {
    let err = ctoml::parse("t = {a = 1}\nt.b = 2\n", ParserConfig::strict()).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InlineTableImmutability);
}

#[test]
fn scenario_5_lenient_duplicate_key() {
    let (doc, warnings) = ctoml::parse("k = 1\nk = 2\n", ParserConfig::lenient()).unwrap();
    assert_eq!(doc.root.get("k"), Some(&Value::Integer(1)));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, DiagnosticKind::DuplicateKey);
    assert_eq!(warnings[0].span.line, 2);
}

#[test]
fn scenario_6_datetime_normalization() {
    let (doc, _) = ctoml::parse("dt = 1987-07-05 17:45z\n", ParserConfig::strict()).unwrap();
    match doc.root.get("dt") {
        Some(Value::OffsetDateTime(dt)) => {
            assert_eq!(dt.year, Some(1987));
            assert_eq!(dt.month, Some(7));
            assert_eq!(dt.day, Some(5));
            assert_eq!(dt.hour, Some(17));
            assert_eq!(dt.minute, Some(45));
            assert_eq!(dt.second, Some(0));
            assert_eq!(dt.offset_minutes, Some(0));
        }
        other => panic!("expected OffsetDateTime, got {other:?}"),
    }
}

#[test]
fn scenario_7_multiline_basic_line_ending_backslash() {
    let (doc, _) = ctoml::parse("s = \"\"\"foo \\\n    bar\"\"\"\n", ParserConfig::strict()).unwrap();
    assert_eq!(doc.root.get("s"), Some(&Value::String("foo bar".to_string())));
}

#[test]
fn scenario_8_nested_array_of_tables_pins_parent() {
    let err = ctoml::parse("[[a.b]]\n[[a]]\n", ParserConfig::strict()).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::TypeConflict);
}
