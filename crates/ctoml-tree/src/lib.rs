//! Builds a [`value::Document`] from a token stream, enforcing every
//! structural invariant the lexer alone can't see: duplicate keys,
//! table re-opening, dotted-key/header conflicts, inline-table
//! immutability, and array-of-tables pinning.
//!
//! Plays the role `faxc-par` plays for the compiler this workspace is
//! shaped after, but builds a value tree rather than an AST: there's no
//! further lowering stage downstream, so the builder's output is the
//! product.

pub mod builder;
pub mod value;

pub use builder::{parse, Builder};
pub use value::{DateTimeValue, Document, Table, Value};
