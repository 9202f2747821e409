//! Path bookkeeping for the tree builder's non-local invariants.
//!
//! A TOML document's structural rules aren't local to one production —
//! whether `[a.b]` is legal depends on everything the parser has seen
//! before it. `PathSets` is the flat, `FxHashSet`-backed bookkeeping that
//! replaces the arena-and-parent-chain scope tree a name resolver would
//! use for this: TOML's table namespace has no nested lexical scoping to
//! walk, only a handful of membership questions asked over and over, so a
//! set of dotted path strings per question is enough.
use rustc_hash::FxHashSet;

/// Joins path segments the same way throughout the builder, so every set
/// in [`PathSets`] agrees on what a "path" string looks like.
pub fn join_path(segments: &[String]) -> String {
    segments.join("\u{1}")
}

#[derive(Debug, Default)]
pub struct PathSets {
    /// Paths opened by a `[table]` header. Re-opening one is always an
    /// error, strict or lenient.
    pub explicit_tables: FxHashSet<String>,
    /// Base paths of array-of-tables (`[[array]]`). Once a name is an
    /// array-of-tables it can never become a plain table or vice versa.
    pub array_of_tables: FxHashSet<String>,
    /// Paths implicitly created by a dotted-key assignment
    /// (`a.b.c = 1` implicitly creates tables at `a` and `a.b`). An
    /// implicit table may later be "completed" by exactly one explicit
    /// `[a.b]` header; a second one is a re-open error.
    pub dotted_tables: FxHashSet<String>,
    /// Paths inside a closed inline table. Any write under one of these
    /// is an immutability violation, regardless of strictness.
    pub inline_frozen: FxHashSet<String>,
    /// Strict prefixes of an `[[array.of.tables]]` header's path, pinned as
    /// plain (non-array) tables the moment that header is parsed. A later
    /// `[[a]]` trying to make one of these an array of tables is a type
    /// conflict, even though the path was never itself array-of-tables.
    pub implicit_table_by_aot: FxHashSet<String>,
    /// Full paths whose value is a `[ ... ]` array literal, not an array of
    /// tables. A later `[[path]]` header would otherwise silently push a
    /// table into someone's plain array; this catches it as a conflict.
    pub static_array_paths: FxHashSet<String>,
    /// Full paths of keys that already carry a value in their containing
    /// table (bare or dotted). Used for duplicate-key detection.
    pub assigned_keys: FxHashSet<String>,
    /// The table path currently open for plain `key = value` lines: the
    /// last `[table]` header, or the path of the most recently appended
    /// element of an array-of-tables.
    pub current_path: Vec<String>,
}

impl PathSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inline_frozen(&self, path: &str) -> bool {
        self.inline_frozen.contains(path)
    }

    pub fn mark_inline_frozen(&mut self, path: String) {
        self.inline_frozen.insert(path);
    }

    pub fn is_explicit_table(&self, path: &str) -> bool {
        self.explicit_tables.contains(path)
    }

    pub fn is_array_of_tables(&self, path: &str) -> bool {
        self.array_of_tables.contains(path)
    }

    pub fn is_dotted_table(&self, path: &str) -> bool {
        self.dotted_tables.contains(path)
    }

    pub fn mark_dotted_table(&mut self, path: String) {
        self.dotted_tables.insert(path);
    }

    pub fn is_implicit_table_by_aot(&self, path: &str) -> bool {
        self.implicit_table_by_aot.contains(path)
    }

    pub fn mark_implicit_table_by_aot(&mut self, path: String) {
        self.implicit_table_by_aot.insert(path);
    }

    pub fn is_static_array_path(&self, path: &str) -> bool {
        self.static_array_paths.contains(path)
    }

    pub fn mark_static_array_path(&mut self, path: String) {
        self.static_array_paths.insert(path);
    }

    /// Drops every frozen path under `prefix` (but not `prefix` itself),
    /// called when a fresh array-of-tables element is appended so a prior
    /// sibling's inline-table freezes don't bleed into the new one.
    pub fn clear_inline_frozen_under(&mut self, prefix: &str) {
        let marker = format!("{prefix}\u{1}");
        self.inline_frozen.retain(|p| !p.starts_with(&marker));
    }

    pub fn mark_explicit_table(&mut self, path: String) {
        self.explicit_tables.insert(path);
    }

    pub fn mark_array_of_tables(&mut self, path: String) {
        self.array_of_tables.insert(path);
    }

    pub fn is_key_assigned(&self, path: &str) -> bool {
        self.assigned_keys.contains(path)
    }

    pub fn mark_key_assigned(&mut self, path: String) {
        self.assigned_keys.insert(path);
    }

    pub fn set_current_path(&mut self, path: Vec<String>) {
        self.current_path = path;
    }
}
