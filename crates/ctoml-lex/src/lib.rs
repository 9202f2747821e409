//! Source validation and tokenization for the ctoml workspace.
//!
//! Plays the role `faxc-lex` plays for the compiler this workspace is
//! shaped after: [`validator::validate`] is the source validation pass,
//! and [`Lexer`] is the tokenizer, exposing two context-aware entry
//! points ([`Lexer::next_key_token`], [`Lexer::next_value_token`]) that
//! the tree builder in `ctoml-tree` drives directly, plus
//! [`Lexer::next_structural_token`] for what follows a value.

pub mod cursor;
mod lexer;
pub mod token;
pub mod unicode;
pub mod validator;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
pub use validator::validate;
