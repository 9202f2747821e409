//! Bare keys and the bare-word value literals (`true`, `false`, `inf`, `nan`).

use ctoml_util::DiagnosticKind;

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};
use crate::unicode::is_bare_key_continue;
use ctoml_util::ParseFailure;

impl<'a> Lexer<'a> {
    pub(super) fn lex_bare_key(&mut self) -> Token {
        while is_bare_key_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        self.make(TokenKind::BareKey)
    }

    /// A value starting with an ASCII letter: `true`, `false`, or an
    /// unsigned `inf`/`nan`. Anything else is a syntax error; TOML has no
    /// other bare-word values.
    pub(super) fn lex_keyword_value(&mut self) -> Result<Token, ParseFailure> {
        for (word, kind) in [
            ("true", TokenKind::Boolean),
            ("false", TokenKind::Boolean),
            ("inf", TokenKind::Float),
            ("nan", TokenKind::Float),
        ] {
            if self.matches_bare_word(word) {
                self.cursor.advance_n(word.len());
                return Ok(self.make(kind));
            }
        }
        Err(self.error(
            DiagnosticKind::UnexpectedCharacter,
            format!("unexpected character '{}'", self.cursor.current_char()),
        ))
    }

    /// True if `word` occurs here and is not itself the prefix of a
    /// longer bare-key-like run (so `trueish` is rejected, not silently
    /// truncated to `true` plus a dangling `ish`).
    fn matches_bare_word(&self, word: &str) -> bool {
        let remaining = self.cursor.remaining();
        if !remaining.starts_with(word) {
            return false;
        }
        match remaining[word.len()..].chars().next() {
            Some(c) => !is_bare_key_continue(c),
            None => true,
        }
    }
}
