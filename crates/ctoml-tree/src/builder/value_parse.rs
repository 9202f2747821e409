//! Turns a value-position [`Token`] into a [`Value`]: integer/float
//! literal decoding and RFC 3339 date/time field validation. Inline
//! tables and arrays recurse back through [`Builder::parse_value`] from
//! their own modules.

use ctoml_lex::{Token, TokenKind};
use ctoml_util::{DiagnosticKind, ParseFailure};

use super::Builder;
use crate::value::{DateTimeValue, Value};

impl<'a> Builder<'a> {
    pub(crate) fn parse_value(&mut self) -> Result<Value, ParseFailure> {
        let token = self.lexer.next_value_token()?;
        match token.kind {
            TokenKind::Integer => self.parse_integer(&token),
            TokenKind::Float => self.parse_float(&token),
            TokenKind::Boolean => Ok(Value::Boolean(token.lexeme == "true")),
            k if k.is_string() => Ok(Value::String(token.lexeme)),
            TokenKind::OffsetDateTime => Ok(Value::OffsetDateTime(self.parse_datetime(&token)?)),
            TokenKind::LocalDateTime => Ok(Value::LocalDateTime(self.parse_datetime(&token)?)),
            TokenKind::LocalDate => Ok(Value::LocalDate(self.parse_datetime(&token)?)),
            TokenKind::LocalTime => Ok(Value::LocalTime(self.parse_datetime(&token)?)),
            TokenKind::LeftBrace => self.parse_inline_table(),
            TokenKind::LeftBracket => self.parse_array(),
            _ => Err(self.unexpected(&token, "expected a value")),
        }
    }

    fn number_error(&self, token: &Token, message: impl Into<String>) -> ParseFailure {
        self.handler.fatal(DiagnosticKind::InvalidNumber, token.span, message.into())
    }

    /// `Integer` lexemes keep their raw shape (sign, radix prefix,
    /// underscores) from the lexer; only here, with the strictness
    /// handler in hand, do leading zeros get their recoverable treatment.
    fn parse_integer(&mut self, token: &Token) -> Result<Value, ParseFailure> {
        let lexeme = token.lexeme.as_str();
        let (negative, unsigned) = match lexeme.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lexeme.strip_prefix('+').unwrap_or(lexeme)),
        };
        let cleaned: String = unsigned.chars().filter(|&c| c != '_').collect();

        let magnitude: i128 = if let Some(digits) = cleaned.strip_prefix("0x") {
            i128::from_str_radix(digits, 16).map_err(|_| self.number_error(token, "malformed hex integer"))?
        } else if let Some(digits) = cleaned.strip_prefix("0o") {
            i128::from_str_radix(digits, 8).map_err(|_| self.number_error(token, "malformed octal integer"))?
        } else if let Some(digits) = cleaned.strip_prefix("0b") {
            i128::from_str_radix(digits, 2).map_err(|_| self.number_error(token, "malformed binary integer"))?
        } else {
            if cleaned.len() > 1 && cleaned.starts_with('0') {
                self.handler.recoverable(
                    DiagnosticKind::InvalidNumber,
                    token.span,
                    format!("integer `{lexeme}` has a leading zero"),
                )?;
            }
            cleaned.parse::<i128>().map_err(|_| self.number_error(token, "malformed integer"))?
        };

        let signed = if negative { -magnitude } else { magnitude };
        let value = i64::try_from(signed).map_err(|_| self.number_error(token, "integer out of signed-64 range"))?;
        Ok(Value::Integer(value))
    }

    /// `Float` lexemes: `inf`/`nan` (optionally signed) decode directly;
    /// everything else strips underscores and goes through the standard
    /// IEEE-754 parser, after the same recoverable leading-zero check the
    /// integer path performs on the mantissa's integer part.
    fn parse_float(&mut self, token: &Token) -> Result<Value, ParseFailure> {
        let lexeme = token.lexeme.as_str();
        let (negative, unsigned) = match lexeme.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lexeme.strip_prefix('+').unwrap_or(lexeme)),
        };
        if unsigned == "inf" {
            return Ok(Value::Float(if negative { f64::NEG_INFINITY } else { f64::INFINITY }));
        }
        if unsigned == "nan" {
            return Ok(Value::Float(if negative { -f64::NAN } else { f64::NAN }));
        }

        let cleaned: String = unsigned.chars().filter(|&c| c != '_').collect();
        let mantissa_end = cleaned.find(|c: char| matches!(c, '.' | 'e' | 'E')).unwrap_or(cleaned.len());
        let mantissa_int = &cleaned[..mantissa_end];
        if mantissa_int.len() > 1 && mantissa_int.starts_with('0') {
            self.handler.recoverable(
                DiagnosticKind::InvalidNumber,
                token.span,
                format!("float `{lexeme}` has a leading zero"),
            )?;
        }

        let magnitude: f64 = cleaned.parse().map_err(|_| self.number_error(token, "malformed float"))?;
        Ok(Value::Float(if negative { -magnitude } else { magnitude }))
    }

    /// RFC 3339 field validation and the fractional-second normalization
    /// rule: pad to millisecond precision when the literal gives fewer
    /// than 3 digits, preserve (up to nanosecond resolution) otherwise.
    fn parse_datetime(&self, token: &Token) -> Result<DateTimeValue, ParseFailure> {
        let bytes = token.lexeme.as_bytes();
        let invalid = |message: &str| self.handler.fatal(DiagnosticKind::InvalidDateTime, token.span, message.to_string());

        let has_date = matches!(token.kind, TokenKind::OffsetDateTime | TokenKind::LocalDateTime | TokenKind::LocalDate);
        let has_time = matches!(token.kind, TokenKind::OffsetDateTime | TokenKind::LocalDateTime | TokenKind::LocalTime);

        let mut pos = 0usize;
        let mut year = None;
        let mut month = None;
        let mut day = None;
        if has_date {
            let y: u16 = digits(bytes, &mut pos, 4).ok_or_else(|| invalid("malformed year"))?;
            pos += 1; // '-'
            let m: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed month"))?;
            pos += 1; // '-'
            let d: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed day"))?;
            if !(1..=12).contains(&m) {
                return Err(invalid("month out of range"));
            }
            if d < 1 || d > days_in_month(y, m) {
                return Err(invalid("day out of range for month"));
            }
            year = Some(y);
            month = Some(m);
            day = Some(d);
            if has_time && pos < bytes.len() {
                pos += 1; // 'T' / 't' / ' '
            }
        }

        let mut hour = None;
        let mut minute = None;
        let mut second = None;
        let mut nanosecond = None;
        if has_time {
            let h: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed hour"))?;
            pos += 1; // ':'
            let mi: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed minute"))?;
            if h > 23 {
                return Err(invalid("hour out of range"));
            }
            if mi > 59 {
                return Err(invalid("minute out of range"));
            }
            hour = Some(h);
            minute = Some(mi);

            // Seconds are optional (1.1.0); omitted, they default to 0.
            if pos < bytes.len() && bytes[pos] == b':' {
                pos += 1;
                let s: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed second"))?;
                if s > 59 {
                    return Err(invalid("second out of range"));
                }
                second = Some(s);

                if pos < bytes.len() && bytes[pos] == b'.' {
                    pos += 1;
                    let start = pos;
                    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                        pos += 1;
                    }
                    nanosecond = Some(normalize_fraction(&token.lexeme[start..pos]));
                }
            } else {
                second = Some(0);
            }
        }

        let mut offset_minutes = None;
        if token.kind == TokenKind::OffsetDateTime && pos < bytes.len() {
            match bytes[pos] {
                b'Z' | b'z' => offset_minutes = Some(0),
                b'+' | b'-' => {
                    let sign = if bytes[pos] == b'-' { -1i16 } else { 1i16 };
                    pos += 1;
                    let oh: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed offset hour"))?;
                    pos += 1; // ':'
                    let om: u8 = digits(bytes, &mut pos, 2).ok_or_else(|| invalid("malformed offset minute"))?;
                    if oh > 23 || om > 59 {
                        return Err(invalid("offset out of range"));
                    }
                    offset_minutes = Some(sign * (oh as i16 * 60 + om as i16));
                }
                _ => return Err(invalid("malformed timezone offset")),
            }
        }

        Ok(DateTimeValue {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            offset_minutes,
        })
    }
}

/// Parses exactly `count` ASCII digits starting at `*pos`, advancing it.
fn digits<T: std::str::FromStr>(bytes: &[u8], pos: &mut usize, count: usize) -> Option<T> {
    if *pos + count > bytes.len() {
        return None;
    }
    let slice = &bytes[*pos..*pos + count];
    if !slice.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let text = std::str::from_utf8(slice).ok()?;
    *pos += count;
    text.parse().ok()
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Pads a fractional-second digit string shorter than 3 digits with
/// trailing zeros, then right-pads (or truncates beyond nanosecond
/// precision) to a fixed nanosecond count.
fn normalize_fraction(digits: &str) -> u32 {
    let padded = if digits.len() < 3 {
        format!("{digits:0<3}")
    } else {
        digits.to_string()
    };
    let nanos = if padded.len() < 9 {
        format!("{padded:0<9}")
    } else {
        padded[..9].to_string()
    };
    nanos.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::value::Value;
    use ctoml_util::DiagnosticKind;

    #[test]
    fn parses_decimal_integer() {
        let (doc, _) = parse("a = 42\n", true).unwrap();
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(42)));
    }

    #[test]
    fn parses_negative_hex_and_underscored_integers() {
        let (doc, _) = parse("a = -17\nb = 0xFF\nc = 1_000_000\n", true).unwrap();
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(-17)));
        assert_eq!(doc.root.get("b"), Some(&Value::Integer(255)));
        assert_eq!(doc.root.get("c"), Some(&Value::Integer(1_000_000)));
    }

    #[test]
    fn leading_zero_integer_is_fatal_in_strict_mode() {
        let err = parse("a = 007\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InvalidNumber);
    }

    #[test]
    fn leading_zero_integer_is_a_warning_in_lenient_mode() {
        let (doc, warnings) = parse("a = 007\n", false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(7)));
    }

    #[test]
    fn integer_boundary_at_i64_max_succeeds_one_past_fails() {
        let (doc, _) = parse("a = 9223372036854775807\n", true).unwrap();
        assert_eq!(doc.root.get("a"), Some(&Value::Integer(i64::MAX)));
        let err = parse("a = 9223372036854775808\n", true).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InvalidNumber);
    }

    #[test]
    fn parses_float_with_exponent_and_signed_infinity() {
        let (doc, _) = parse("a = 6.022e23\nb = -inf\nc = nan\n", true).unwrap();
        assert_eq!(doc.root.get("a"), Some(&Value::Float(6.022e23)));
        assert_eq!(doc.root.get("b"), Some(&Value::Float(f64::NEG_INFINITY)));
        assert!(matches!(doc.root.get("c"), Some(Value::Float(f)) if f.is_nan()));
    }

    #[test]
    fn offset_datetime_normalizes_space_separator_and_missing_seconds() {
        let (doc, _) = parse("dt = 1987-07-05 17:45z\n", true).unwrap();
        match doc.root.get("dt") {
            Some(Value::OffsetDateTime(dt)) => {
                assert_eq!(dt.year, Some(1987));
                assert_eq!(dt.hour, Some(17));
                assert_eq!(dt.minute, Some(45));
                assert_eq!(dt.second, Some(0));
                assert_eq!(dt.offset_minutes, Some(0));
            }
            other => panic!("expected OffsetDateTime, got {other:?}"),
        }
    }

    #[test]
    fn fractional_second_pads_to_milliseconds() {
        let (doc, _) = parse("t = 12:34:56.6\n", true).unwrap();
        match doc.root.get("t") {
            Some(Value::LocalTime(t)) => assert_eq!(t.nanosecond, Some(600_000_000)),
            other => panic!("expected LocalTime, got {other:?}"),
        }
    }

    #[test]
    fn fractional_second_beyond_milliseconds_is_preserved() {
        let (doc, _) = parse("t = 12:34:56.123456\n", true).unwrap();
        match doc.root.get("t") {
            Some(Value::LocalTime(t)) => assert_eq!(t.nanosecond, Some(123_456_000)),
            other => panic!("expected LocalTime, got {other:?}"),
        }
    }

    #[test]
    fn leap_year_dates_accepted_and_rejected() {
        assert!(parse("a = 2000-02-29\n", true).is_ok());
        assert!(parse("a = 2400-02-29\n", true).is_ok());
        assert!(parse("a = 2100-02-29\n", true).is_err());
        assert!(parse("a = 1900-02-29\n", true).is_err());
        assert!(parse("a = 2024-02-30\n", true).is_err());
    }
}
