//! Basic, literal, and multiline string lexing.

use ctoml_util::{DiagnosticKind, ParseFailure};

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};
use crate::unicode::{is_valid_scalar, parse_hex_codepoint};

impl<'a> Lexer<'a> {
    /// A quoted string in key position: basic or literal only, never
    /// multiline (a multiline opener here is a syntax error).
    pub(super) fn lex_quoted_key_string(&mut self, quote: char) -> Result<Token, ParseFailure> {
        if self.cursor.peek_char(1) == quote && self.cursor.peek_char(2) == quote {
            return Err(self.error(DiagnosticKind::SyntaxError, "a key cannot be a multiline string"));
        }
        if quote == '"' {
            self.lex_basic_string()
        } else {
            self.lex_literal_string()
        }
    }

    pub(super) fn lex_basic_string(&mut self) -> Result<Token, ParseFailure> {
        if self.cursor.peek_char(1) == '"' && self.cursor.peek_char(2) == '"' {
            return self.lex_multiline_basic_string();
        }
        self.cursor.advance();
        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated string"));
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated string")),
                '\\' => {
                    self.cursor.advance();
                    content.push(self.parse_escape()?);
                }
                c => {
                    content.push(c);
                    self.cursor.advance();
                }
            }
        }
        Ok(self.make_with_lexeme(TokenKind::BasicString, content))
    }

    pub(super) fn lex_literal_string(&mut self) -> Result<Token, ParseFailure> {
        if self.cursor.peek_char(1) == '\'' && self.cursor.peek_char(2) == '\'' {
            return self.lex_multiline_literal_string();
        }
        self.cursor.advance();
        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated string"));
            }
            match self.cursor.current_char() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated string")),
                c => {
                    content.push(c);
                    self.cursor.advance();
                }
            }
        }
        Ok(self.make_with_lexeme(TokenKind::LiteralString, content))
    }

    fn lex_multiline_basic_string(&mut self) -> Result<Token, ParseFailure> {
        self.cursor.advance_n(3);
        // A newline immediately after the opening delimiter is trimmed.
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance_n(2);
        } else if self.cursor.current_char() == '\n' {
            self.cursor.advance();
        }

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated multiline string"));
            }
            if self.cursor.current_char() == '"'
                && self.cursor.peek_char(1) == '"'
                && self.cursor.peek_char(2) == '"'
            {
                // Up to two extra quotes may belong to the content itself.
                let mut quote_run = 0;
                while self.cursor.peek_char(quote_run) == '"' {
                    quote_run += 1;
                }
                let content_quotes = quote_run.saturating_sub(3).min(2);
                for _ in 0..content_quotes {
                    content.push('"');
                    self.cursor.advance();
                }
                self.cursor.advance_n(3);
                break;
            }
            if self.cursor.current_char() == '\\' {
                self.cursor.advance();
                if self.cursor.current_char() == '\n'
                    || (self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n')
                    || crate::unicode::is_inline_whitespace(self.cursor.current_char())
                {
                    self.skip_line_ending_backslash();
                    continue;
                }
                content.push(self.parse_escape()?);
                continue;
            }
            content.push(self.cursor.current_char());
            self.cursor.advance();
        }
        Ok(self.make_with_lexeme(TokenKind::MultilineBasicString, content))
    }

    fn lex_multiline_literal_string(&mut self) -> Result<Token, ParseFailure> {
        self.cursor.advance_n(3);
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance_n(2);
        } else if self.cursor.current_char() == '\n' {
            self.cursor.advance();
        }

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(DiagnosticKind::UnterminatedString, "unterminated multiline string"));
            }
            if self.cursor.current_char() == '\''
                && self.cursor.peek_char(1) == '\''
                && self.cursor.peek_char(2) == '\''
            {
                let mut quote_run = 0;
                while self.cursor.peek_char(quote_run) == '\'' {
                    quote_run += 1;
                }
                let content_quotes = quote_run.saturating_sub(3).min(2);
                for _ in 0..content_quotes {
                    content.push('\'');
                    self.cursor.advance();
                }
                self.cursor.advance_n(3);
                break;
            }
            if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
                content.push('\n');
                self.cursor.advance_n(2);
                continue;
            }
            content.push(self.cursor.current_char());
            self.cursor.advance();
        }
        Ok(self.make_with_lexeme(TokenKind::MultilineLiteralString, content))
    }

    /// A `\` at the end of a line in a multiline basic string consumes the
    /// newline and all following whitespace, joining the lines.
    fn skip_line_ending_backslash(&mut self) {
        loop {
            match self.cursor.current_char() {
                c if crate::unicode::is_inline_whitespace(c) => self.cursor.advance(),
                '\r' if self.cursor.peek_char(1) == '\n' => self.cursor.advance_n(2),
                '\n' => self.cursor.advance(),
                _ => break,
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseFailure> {
        if self.cursor.is_at_end() {
            return Err(self.error(DiagnosticKind::InvalidEscape, "unterminated escape sequence"));
        }
        let c = self.cursor.current_char();
        self.cursor.advance();
        match c {
            'b' => Ok('\u{0008}'),
            't' => Ok('\t'),
            'n' => Ok('\n'),
            'f' => Ok('\u{000C}'),
            'r' => Ok('\r'),
            'e' => Ok('\u{001B}'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            'x' => self.parse_hex_escape(2, DiagnosticKind::InvalidEscape),
            'u' => self.parse_hex_escape(4, DiagnosticKind::InvalidEscape),
            'U' => self.parse_hex_escape(8, DiagnosticKind::InvalidEscape),
            other => Err(self.error(DiagnosticKind::InvalidEscape, format!("invalid escape sequence '\\{other}'"))),
        }
    }

    fn parse_hex_escape(&mut self, digits: usize, kind: DiagnosticKind) -> Result<char, ParseFailure> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            let c = self.cursor.current_char();
            if !c.is_ascii_hexdigit() {
                return Err(self.error(kind, format!("expected {digits} hex digits in escape sequence")));
            }
            hex.push(c);
            self.cursor.advance();
        }
        let codepoint = parse_hex_codepoint(&hex)
            .filter(|&cp| is_valid_scalar(cp))
            .ok_or_else(|| self.error(kind, format!("\\{hex} is not a valid Unicode scalar value")))?;
        char::from_u32(codepoint).ok_or_else(|| self.error(kind, format!("\\{hex} is not a valid Unicode scalar value")))
    }
}
