//! Source validation: the pass that runs before tokenization.
//!
//! Rejects malformed UTF-8 and bare control characters up front, so the
//! tokenizer itself never has to special-case byte-level corruption.

use ctoml_util::{DiagnosticKind, ParseFailure, Span};

/// Validate that `bytes` is well-formed UTF-8 with no illegal bare control
/// characters, returning the borrowed `&str` on success.
///
/// A control character (U+0000..=U+0008, U+000B, U+000C, U+000E..=U+001F,
/// U+007F) is only legal inside a string literal's escape sequence; one
/// appearing unescaped anywhere in the source is rejected here rather than
/// left for the tokenizer to trip over mid-token. `\t` (U+0009) and `\n`
/// (U+000A) are always fine. A bare `\r` is accepted only when immediately
/// followed by `\n`.
pub fn validate(bytes: &[u8]) -> Result<&str, ParseFailure> {
    let source = std::str::from_utf8(bytes).map_err(|err| {
        let offset = err.valid_up_to();
        let span = Span::point(offset, line_of(bytes, offset), column_of(bytes, offset));
        ParseFailure {
            kind: DiagnosticKind::InvalidEncoding,
            span,
            message: "source is not valid UTF-8".to_string(),
            snippet: String::new(),
        }
    })?;

    let mut line = 1u32;
    let mut column = 1u32;
    let mut chars = source.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        let is_illegal_control = matches!(c,
            '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000C}' | '\u{000E}'..='\u{001F}' | '\u{007F}'
        );
        if is_illegal_control {
            let span = Span::point(offset, line, column);
            return Err(ParseFailure {
                kind: DiagnosticKind::InvalidEncoding,
                span,
                message: format!("bare control character U+{:04X} is not allowed", c as u32),
                snippet: String::new(),
            });
        }
        if c == '\r' {
            let next_is_newline = chars.peek().map(|&(_, next)| next == '\n').unwrap_or(false);
            if !next_is_newline {
                let span = Span::point(offset, line, column);
                return Err(ParseFailure {
                    kind: DiagnosticKind::InvalidEncoding,
                    span,
                    message: "bare carriage return must be followed by a line feed".to_string(),
                    snippet: String::new(),
                });
            }
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    Ok(source)
}

fn line_of(bytes: &[u8], offset: usize) -> u32 {
    1 + bytes[..offset].iter().filter(|&&b| b == b'\n').count() as u32
}

fn column_of(bytes: &[u8], offset: usize) -> u32 {
    let start = bytes[..offset].iter().rposition(|&b| b == b'\n').map(|p| p + 1).unwrap_or(0);
    (offset - start + 1) as u32
}
