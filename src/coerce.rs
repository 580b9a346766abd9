//! Conversion of raw source strings into typed field values.
//!
//! The same rules apply whichever source the string came from (default, flag,
//! environment variable or file), so a value behaves identically no matter
//! where it is configured.

use crate::error::BindError;
use crate::provenance::SourceKind;
use crate::schema::FieldKind;

/// A coerced value, ready to be written into a field slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

/// Strings that mean `false` for boolean fields (compared case-insensitively).
const FALSE_WORDS: &[&str] = &["0", "f", "false", "n", "no"];

/// Coerce `raw` into `kind`.
///
/// `source` and `key` only feed the error message.
pub(crate) fn coerce(
    kind: FieldKind,
    raw: &str,
    source: SourceKind,
    key: &str,
) -> Result<Value, BindError> {
    match kind {
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| BindError::Coercion {
                source,
                key: key.to_string(),
                value: raw.to_string(),
                expected: kind,
            }),
        FieldKind::Boolean => Ok(Value::Boolean(parse_bool(raw))),
    }
}

/// Interpret a raw string as a boolean.
///
/// `"0"`, `"f"`, `"false"`, `"n"` and `"no"` (any case) are false. Everything
/// else is true, including the empty string: an environment variable or flag
/// that is present at all switches the field on.
pub fn parse_bool(raw: &str) -> bool {
    !FALSE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w))
}
