//! Notes store: the ordered collection and its persistence rules.
//!
//! # Responsibility
//! - Own the in-memory notes sequence and every operation on it.
//! - Decode persisted payloads defensively; encode them deterministically.
//!
//! # See also
//! - `crate::storage`: the key-value medium the store writes through.

mod codec;
mod notes_store;

pub use codec::{decode_notes, FormatError};
pub use notes_store::{
    NotesStore, PersistenceError, StoreError, StoreResult, NOTES_KEY,
};
