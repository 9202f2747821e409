//! Shared primitives for the ctoml workspace: source spans and the
//! diagnostic model both the lexer and tree builder report through.
//!
//! Plays the role `faxc-util` plays for the compiler this workspace is
//! shaped after: a dependency-free leaf crate the rest of the pipeline
//! builds on.

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{DiagnosticKind, Handler, Level, SourceSnippet};
pub use error::{ParseFailure, Warning};
pub use span::Span;
