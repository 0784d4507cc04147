//! Domain model for user notes.
//!
//! # Responsibility
//! - Define the canonical note record and its priority tag.
//! - Own creation-time validation (trim + non-empty invariants).
//!
//! # Invariants
//! - Every constructed note carries a fresh, immutable `NoteId`.
//! - `title` and `content` are never blank for a constructed note.

pub mod note;

pub use note::{Note, NoteId, NoteValidationError, Priority};
