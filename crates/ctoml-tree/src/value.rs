//! The parsed value tree.

use indexmap::IndexMap;

/// A parsed TOML value.
///
/// `Table` uses [`IndexMap`] rather than a `HashMap` so that re-emitting a
/// parsed document (or simply iterating it for display) preserves the
/// order keys were written in, the same requirement TOML implementations
/// universally hold themselves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    OffsetDateTime(DateTimeValue),
    LocalDateTime(DateTimeValue),
    LocalDate(DateTimeValue),
    LocalTime(DateTimeValue),
    Array(Vec<Value>),
    Table(Table),
}

/// A table: an ordered map from key to value, plus the bookkeeping the
/// builder needs to enforce non-local invariants (re-opening, inline
/// freezing) is kept separately, in `builder::paths::PathSets` — `Table`
/// itself is just the output shape.
pub type Table = IndexMap<String, Value>;

/// A normalized RFC 3339 date/time component.
///
/// Fractional seconds are normalized to nanosecond precision: right-padded
/// with zeros when the literal's fractional part is shorter than 9 digits,
/// truncated to the first 9 when it's longer. The four TOML date/time
/// kinds share this shape; which fields are populated is implied by the
/// surrounding [`Value`] variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateTimeValue {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    /// Nanosecond component, normalized to a fixed width (see
    /// `builder::value_parse`).
    pub nanosecond: Option<u32>,
    /// Offset from UTC in minutes, for `OffsetDateTime` only.
    pub offset_minutes: Option<i16>,
}

impl Value {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::OffsetDateTime(_) => "offset date-time",
            Value::LocalDateTime(_) => "local date-time",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }
}

/// A parsed document: its value tree plus where the root table begins
/// (always the start of the source).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Table,
}

impl Document {
    pub fn new() -> Self {
        Self { root: Table::new() }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_matches_variant() {
        assert_eq!(Value::Integer(1).type_name(), "integer");
        assert_eq!(Value::Table(Table::new()).type_name(), "table");
    }

    #[test]
    fn as_table_mut_allows_insertion() {
        let mut value = Value::Table(Table::new());
        value.as_table_mut().unwrap().insert("a".to_string(), Value::Integer(1));
        assert_eq!(value.as_table().unwrap().get("a"), Some(&Value::Integer(1)));
    }
}
