//! Decoding of persisted note payloads.
//!
//! # Responsibility
//! - Turn a raw persisted string into a validated note sequence.
//! - Classify every way the payload can be malformed.
//!
//! # Invariants
//! - The wire shape is a JSON array of note records; anything else is a
//!   `FormatError`, never a panic.

use crate::model::Note;
use serde_json::Value;
use std::fmt;

/// Why a persisted or imported payload could not be decoded.
#[derive(Debug)]
pub enum FormatError {
    /// The payload is not valid JSON at all.
    Syntax(serde_json::Error),
    /// The payload parsed, but the top-level value is not an array.
    TopLevelNotArray { found: &'static str },
    /// The array parsed, but a record is missing or mistypes a required field.
    InvalidRecord(serde_json::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Syntax(err) => write!(f, "payload is not valid JSON: {err}"),
            FormatError::TopLevelNotArray { found } => {
                write!(f, "expected a JSON array of notes, found {found}")
            }
            FormatError::InvalidRecord(err) => {
                write!(f, "note record is malformed: {err}")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Syntax(err) | FormatError::InvalidRecord(err) => Some(err),
            FormatError::TopLevelNotArray { .. } => None,
        }
    }
}

/// Decodes a raw payload into notes.
///
/// The checks run in order: syntax, top-level shape, per-record fields.
/// The first failure wins, so callers can report a single precise cause.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>, FormatError> {
    let value: Value = serde_json::from_str(raw).map_err(FormatError::Syntax)?;

    if !value.is_array() {
        return Err(FormatError::TopLevelNotArray {
            found: json_type_name(&value),
        });
    }

    serde_json::from_value(value).map_err(FormatError::InvalidRecord)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    #[test]
    fn decodes_a_well_formed_array() {
        let raw = r#"[
            {"id":"abc123","title":"Groceries","content":"Milk, eggs","priority":"high","createdAt":"2026-08-23T10:00:00.000Z"}
        ]"#;

        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "abc123");
        assert_eq!(notes[0].priority, Priority::High);
    }

    #[test]
    fn decodes_the_empty_array() {
        let notes = decode_notes("[]").unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn rejects_broken_json_as_syntax() {
        let err = decode_notes("[{\"id\":").unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn rejects_non_array_top_level_with_the_found_type() {
        let err = decode_notes(r#"{"id":"abc"}"#).unwrap_err();
        match err {
            FormatError::TopLevelNotArray { found } => assert_eq!(found, "an object"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_records_missing_required_fields() {
        let err = decode_notes(r#"[{"title":"no id"}]"#).unwrap_err();
        assert!(matches!(err, FormatError::InvalidRecord(_)));
    }

    #[test]
    fn rejects_records_with_wrong_typed_fields() {
        let err = decode_notes(r#"[{"id":7,"title":"t","content":"c","createdAt":"now"}]"#)
            .unwrap_err();
        assert!(matches!(err, FormatError::InvalidRecord(_)));
    }

    #[test]
    fn unknown_priority_labels_fall_back_instead_of_failing() {
        let raw = r#"[{"id":"a","title":"t","content":"c","priority":"urgent","createdAt":"now"}]"#;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes[0].priority, Priority::Medium);
    }

    // The label fallback is for strings only; a non-string priority is a
    // mistyped field like any other.
    #[test]
    fn rejects_wrong_typed_priority_instead_of_falling_back() {
        let raw = r#"[{"id":"a","title":"t","content":"c","priority":3,"createdAt":"now"}]"#;
        let err = decode_notes(raw).unwrap_err();
        assert!(matches!(err, FormatError::InvalidRecord(_)));
    }
}
