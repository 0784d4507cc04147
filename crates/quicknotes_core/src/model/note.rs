//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, codec and presenters.
//! - Validate user-supplied text fields at creation time.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `title` and `content` are stored trimmed and non-empty.
//! - `created_at` is an ISO-8601 UTC timestamp, immutable after creation.
//!
//! # Wire format
//! Field names follow the persisted layout (`createdAt` stays camelCase so
//! snapshots written by earlier versions of the app import unchanged).

use crate::id::generate_note_id;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque unique token identifying one note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Qualitative urgency tag attached to every note.
///
/// Serialized lowercase. Deserialization is lenient: any label that is not
/// recognized decodes as [`Priority::Medium`], and a missing field defaults
/// the same way, so imported snapshots never fail on this field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parses a priority label, falling back to `Medium` when unrecognized.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Stable lowercase label used on the wire and in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for user-supplied note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be blank"),
            Self::EmptyContent => write!(f, "note content must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique token, assigned at creation.
    pub id: NoteId,
    /// Short user-supplied heading, trimmed and non-empty.
    pub title: String,
    /// Free-form body, trimmed and non-empty; may contain line breaks.
    pub content: String,
    /// Urgency tag; unknown labels decode as `medium`.
    #[serde(default)]
    pub priority: Priority,
    /// ISO-8601 UTC creation timestamp; opaque once stored.
    pub created_at: String,
}

impl Note {
    /// Builds a new note from user input.
    ///
    /// Trims both text fields, generates a fresh id and stamps the current
    /// UTC time.
    ///
    /// # Errors
    /// - [`NoteValidationError::EmptyTitle`] when the title is blank.
    /// - [`NoteValidationError::EmptyContent`] when the content is blank.
    pub fn create(
        title: &str,
        content: &str,
        priority: Priority,
    ) -> Result<Self, NoteValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }

        Ok(Self {
            id: generate_note_id(),
            title: title.to_string(),
            content: content.to_string(),
            priority,
            created_at: creation_timestamp(),
        })
    }
}

/// Current UTC time in the wire shape used by `created_at`
/// (millisecond precision, `Z` suffix).
fn creation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
