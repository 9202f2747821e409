//! Main `Lexer` struct and its two context-aware dispatch entry points.
//!
//! TOML's grammar is context-sensitive at the token level: a run of digits
//! means an integer in value position but is just a bare key in key
//! position, and a quoted string can open a key but never a multiline one.
//! Rather than guess, the tree builder tells the lexer which context it's
//! in by calling [`Lexer::next_key_token`] or [`Lexer::next_value_token`].

use ctoml_util::{DiagnosticKind, ParseFailure, SourceSnippet, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::unicode::is_inline_whitespace;

pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    source: &'a str,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            source,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Skip spaces and tabs. Does not cross a newline; TOML newlines are
    /// their own significant token.
    fn skip_inline_whitespace(&mut self) {
        while is_inline_whitespace(self.cursor.current_char()) {
            self.cursor.advance();
        }
    }

    /// Skip a `#` comment to end of line, if one starts here. Comments
    /// may not contain control characters other than tab; that is
    /// enforced by source validation before tokenization ever begins.
    fn skip_comment(&mut self) {
        if self.cursor.current_char() == '#' {
            while !self.cursor.is_at_end()
                && self.cursor.current_char() != '\n'
                && self.cursor.current_char() != '\r'
            {
                self.cursor.advance();
            }
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            let before = self.cursor.position();
            self.skip_inline_whitespace();
            self.skip_comment();
            if self.cursor.position() == before {
                break;
            }
        }
    }

    fn begin_token(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    pub(crate) fn token_start(&self) -> usize {
        self.token_start
    }

    pub(crate) fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.cursor.slice_from(self.token_start), self.token_span())
    }

    pub(crate) fn make_with_lexeme(&self, kind: TokenKind, lexeme: String) -> Token {
        Token::new(kind, lexeme, self.token_span())
    }

    /// Build a fatal diagnostic anchored at the current token's span.
    pub(crate) fn error(&self, kind: DiagnosticKind, message: impl Into<String>) -> ParseFailure {
        let span = self.token_span();
        ParseFailure {
            kind,
            span,
            message: message.into(),
            snippet: SourceSnippet::new(self.source, span).format(),
        }
    }

    /// Build a fatal diagnostic anchored at the current cursor position
    /// (used for end-of-file and single-character lookahead failures
    /// where no token has started yet).
    pub(crate) fn error_here(&self, kind: DiagnosticKind, message: impl Into<String>) -> ParseFailure {
        let span = Span::point(self.cursor.position(), self.cursor.line(), self.cursor.column());
        ParseFailure {
            kind,
            span,
            message: message.into(),
            snippet: SourceSnippet::new(self.source, span).format(),
        }
    }

    fn newline_token(&mut self) -> Token {
        if self.cursor.current_char() == '\r' {
            self.cursor.advance();
        }
        self.cursor.advance();
        self.make(TokenKind::Newline)
    }

    fn single_char_token(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.make(kind)
    }

    /// Next token, expecting a key: a bare key, a quoted (non-multiline)
    /// string, or one of the punctuators that can follow a key (`.`, `=`).
    pub fn next_key_token(&mut self) -> Result<Token, ParseFailure> {
        self.skip_trivia();
        self.begin_token();

        if self.cursor.is_at_end() {
            return Ok(self.make(TokenKind::Eof));
        }

        match self.cursor.current_char() {
            '\n' | '\r' => Ok(self.newline_token()),
            '.' => Ok(self.single_char_token(TokenKind::Dot)),
            '=' => Ok(self.single_char_token(TokenKind::Equals)),
            ']' => Ok(self.single_char_token(TokenKind::RightBracket)),
            ',' => Ok(self.single_char_token(TokenKind::Comma)),
            '}' => Ok(self.single_char_token(TokenKind::RightBrace)),
            '[' => Ok(self.single_char_token(TokenKind::LeftBracket)),
            '"' => self.lex_quoted_key_string('"'),
            '\'' => self.lex_quoted_key_string('\''),
            c if crate::unicode::is_bare_key_start(c) => Ok(self.lex_bare_key()),
            c => Err(self.error(DiagnosticKind::UnexpectedCharacter, format!("unexpected character '{c}' in key"))),
        }
    }

    /// Next token, expecting a value: a string, number, boolean,
    /// date/time, or the opening delimiter of an inline array or table.
    pub fn next_value_token(&mut self) -> Result<Token, ParseFailure> {
        self.skip_trivia();
        self.begin_token();

        if self.cursor.is_at_end() {
            return Err(self.error_here(DiagnosticKind::SyntaxError, "unexpected end of input, expected a value"));
        }

        match self.cursor.current_char() {
            '"' => self.lex_basic_string(),
            '\'' => self.lex_literal_string(),
            '[' => Ok(self.single_char_token(TokenKind::LeftBracket)),
            '{' => Ok(self.single_char_token(TokenKind::LeftBrace)),
            c if c.is_ascii_digit() => self.lex_number_or_datetime(),
            '+' | '-' => self.lex_number_or_datetime(),
            c if c.is_ascii_alphabetic() => self.lex_keyword_value(),
            c => Err(self.error(DiagnosticKind::UnexpectedCharacter, format!("unexpected character '{c}'"))),
        }
    }

    /// The token that should follow a value or a table/array-of-tables
    /// header: a newline, a comma (inside inline containers), `]`/`}` to
    /// close one, or EOF.
    pub fn next_structural_token(&mut self) -> Result<Token, ParseFailure> {
        self.skip_trivia();
        self.begin_token();

        if self.cursor.is_at_end() {
            return Ok(self.make(TokenKind::Eof));
        }

        match self.cursor.current_char() {
            '\n' | '\r' => Ok(self.newline_token()),
            ',' => Ok(self.single_char_token(TokenKind::Comma)),
            ']' => Ok(self.single_char_token(TokenKind::RightBracket)),
            '}' => Ok(self.single_char_token(TokenKind::RightBrace)),
            '[' => Ok(self.single_char_token(TokenKind::LeftBracket)),
            c => Err(self.error(DiagnosticKind::SyntaxError, format!("unexpected character '{c}'"))),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// True if the very next character (no trivia skipped) is `c`. Used
    /// by the tree builder to tell `[table]` from `[[array-of-tables]]`
    /// immediately after consuming the opening bracket.
    pub fn peek_is(&self, c: char) -> bool {
        self.cursor.current_char() == c
    }

    /// Skip whitespace, comments, and newlines. Arrays (and, as of 1.1,
    /// inline tables) are the one place a newline is just more trivia
    /// rather than a token the builder needs to see; this lets it ask
    /// for a value or a closing delimiter without tripping over one.
    pub fn skip_newlines_and_trivia(&mut self) {
        loop {
            let before = self.cursor.position();
            self.skip_trivia();
            if self.cursor.current_char() == '\n' {
                self.cursor.advance();
            } else if self.cursor.current_char() == '\r' {
                self.cursor.advance();
                if self.cursor.current_char() == '\n' {
                    self.cursor.advance();
                }
            }
            if self.cursor.position() == before {
                break;
            }
        }
    }
}
