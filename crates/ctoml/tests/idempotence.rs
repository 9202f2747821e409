//! Parsing the same source twice yields structurally equal trees — the
//! builder keeps no hidden mutable state that would make two runs diverge.

use ctoml::{parse, Document, ParserConfig};
use quickcheck_macros::quickcheck;

#[derive(Clone, Debug)]
struct FlatDocument(String);

impl quickcheck::Arbitrary for FlatDocument {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let keys = ["a", "b", "c", "alpha", "beta"];
        let count = (usize::arbitrary(g) % 5) + 1;
        let mut source = String::new();
        for i in 0..count {
            let key = g.choose(&keys).unwrap();
            let value: i64 = i64::arbitrary(g) % 1_000_000;
            source.push_str(&format!("{key}_{i} = {value}\n"));
        }
        FlatDocument(source)
    }
}

fn reparse(source: &str) -> Option<Document> {
    parse(source, ParserConfig::strict()).ok().map(|(doc, _)| doc)
}

#[quickcheck]
fn reparsing_generated_flat_documents_is_idempotent(doc: FlatDocument) -> bool {
    match (reparse(&doc.0), reparse(&doc.0)) {
        (Some(first), Some(second)) => first == second,
        (None, None) => true,
        _ => false,
    }
}

#[test]
fn fixed_document_reparses_identically() {
    let source = "title = \"hi\"\n[owner]\nname = \"a\"\n[[fruits]]\nname = \"apple\"\n";
    let first = reparse(source).unwrap();
    let second = reparse(source).unwrap();
    assert_eq!(first, second);
}
