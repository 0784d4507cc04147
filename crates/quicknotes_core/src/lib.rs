//! Core domain logic for QuickNotes.
//! This crate is the single source of truth for note-keeping invariants.

pub mod id;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use id::generate_note_id;
pub use logging::{default_log_level, init_logging};
pub use model::{Note, NoteId, NoteValidationError, Priority};
pub use storage::{FileStorage, MemoryStorage, SqliteStorage, Storage, StorageError, StorageResult};
pub use store::{
    decode_notes, FormatError, NotesStore, PersistenceError, StoreError, StoreResult, NOTES_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
