//! Notes collection facade.
//!
//! # Responsibility
//! - Provide stable entry points for note CRUD, export and import.
//! - Keep the in-memory sequence and the persisted payload in step.
//!
//! # Invariants
//! - Notes are ordered newest first; `add` always inserts at the head.
//! - Every successful mutation is followed by one synchronous write of the
//!   full collection under [`NOTES_KEY`].
//! - A failed write leaves the in-memory mutation applied; the caller
//!   decides how to surface the degraded state.

use crate::model::{Note, NoteValidationError, Priority};
use crate::storage::{Storage, StorageError};
use crate::store::codec::{decode_notes, FormatError};
use log::{debug, error, info, warn};
use std::fmt;

/// Storage key holding the serialized notes array.
pub const NOTES_KEY: &str = "quickNotes";

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Top-level error for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any state changed.
    Validation(NoteValidationError),
    /// An imported payload could not be decoded.
    Format(FormatError),
    /// Encoding or writing the collection failed.
    Persistence(PersistenceError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(err) => write!(f, "note validation failed: {err}"),
            StoreError::Format(err) => write!(f, "payload decode failed: {err}"),
            StoreError::Persistence(err) => write!(f, "persistence failed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Validation(err) => Some(err),
            StoreError::Format(err) => Some(err),
            StoreError::Persistence(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(err: NoteValidationError) -> Self {
        StoreError::Validation(err)
    }
}

impl From<FormatError> for StoreError {
    fn from(err: FormatError) -> Self {
        StoreError::Format(err)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        StoreError::Persistence(err)
    }
}

/// Why the collection could not be saved or exported.
#[derive(Debug)]
pub enum PersistenceError {
    /// Serializing the collection to JSON failed.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// The storage medium rejected the write.
    Write {
        key: &'static str,
        source: StorageError,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Encode { key, source } => {
                write!(f, "failed to encode payload for key '{key}': {source}")
            }
            PersistenceError::Write { key, source } => {
                write!(f, "failed to write key '{key}': {source}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Encode { source, .. } => Some(source),
            PersistenceError::Write { source, .. } => Some(source),
        }
    }
}

/// Ordered notes collection bound to a storage medium.
pub struct NotesStore<S: Storage> {
    storage: S,
    notes: Vec<Note>,
}

impl<S: Storage> NotesStore<S> {
    /// Loads the persisted collection from the given storage.
    ///
    /// # Contract
    /// - A missing key yields an empty store.
    /// - A corrupt or unreadable payload yields an empty store; the cause is
    ///   logged, never propagated. The caller always gets a usable store.
    pub fn load(storage: S) -> Self {
        let notes = match storage.get(NOTES_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match decode_notes(&raw) {
                Ok(notes) => notes,
                Err(err) => {
                    warn!(
                        "event=notes_load module=store status=error key={NOTES_KEY} recovery=empty error={err}"
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=error key={NOTES_KEY} recovery=empty error={err}"
                );
                Vec::new()
            }
        };
        info!(
            "event=notes_load module=store status=ok count={}",
            notes.len()
        );
        Self { storage, notes }
    }

    /// Returns the notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the number of notes held.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` when the store holds no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Borrows the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Creates a note and persists the updated collection.
    ///
    /// # Contract
    /// - Title and content are trimmed; blank values are rejected before any
    ///   state changes.
    /// - The new note is inserted at the head of the sequence.
    /// - Returns the stored note, ID and timestamp assigned.
    pub fn add(&mut self, title: &str, content: &str, priority: Priority) -> StoreResult<Note> {
        let note = Note::create(title, content, priority)?;
        self.notes.insert(0, note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Deletes every note with the given ID and persists the result.
    ///
    /// # Contract
    /// - Returns `Ok(false)` without touching storage when no note matches.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        if !self.notes.iter().any(|note| note.id == id) {
            return Ok(false);
        }
        self.notes.retain(|note| note.id != id);
        self.persist()?;
        Ok(true)
    }

    /// Removes all notes and persists the empty collection.
    ///
    /// # Contract
    /// - Returns `Ok(0)` without touching storage when already empty.
    /// - Otherwise returns how many notes were removed.
    pub fn clear_all(&mut self) -> StoreResult<usize> {
        if self.notes.is_empty() {
            return Ok(0);
        }
        let removed = self.notes.len();
        self.notes.clear();
        self.persist()?;
        Ok(removed)
    }

    /// Encodes the collection as pretty-printed JSON for export.
    ///
    /// # Contract
    /// - Returns `Ok(None)` when the store is empty; there is nothing to
    ///   export and no file should be produced.
    pub fn export_json(&self) -> StoreResult<Option<String>> {
        if self.notes.is_empty() {
            return Ok(None);
        }
        let payload = serde_json::to_string_pretty(&self.notes).map_err(|source| {
            PersistenceError::Encode {
                key: NOTES_KEY,
                source,
            }
        })?;
        Ok(Some(payload))
    }

    /// Decodes an exported payload and appends its notes to the collection.
    ///
    /// # Contract
    /// - The whole payload is validated before any note is appended; a
    ///   malformed record rejects the import entirely.
    /// - Imported notes keep their IDs and timestamps and are appended after
    ///   the existing notes. Duplicates are not filtered.
    /// - The merged collection is persisted even when zero notes arrived.
    /// - Returns how many notes were imported.
    pub fn import_json(&mut self, payload: &str) -> StoreResult<usize> {
        let imported = decode_notes(payload)?;
        let count = imported.len();
        self.notes.extend(imported);
        self.persist()?;
        info!(
            "event=notes_import module=store status=ok count={count} total={}",
            self.notes.len()
        );
        Ok(count)
    }

    /// Returns notes whose title or content contains the query,
    /// case-insensitively. An empty query matches every note.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn persist(&mut self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.notes).map_err(|source| {
            PersistenceError::Encode {
                key: NOTES_KEY,
                source,
            }
        })?;
        if let Err(source) = self.storage.set(NOTES_KEY, &payload) {
            let err = PersistenceError::Write {
                key: NOTES_KEY,
                source,
            };
            error!("event=notes_persist module=store status=error key={NOTES_KEY} error={err}");
            return Err(err.into());
        }
        debug!(
            "event=notes_persist module=store status=ok key={NOTES_KEY} count={}",
            self.notes.len()
        );
        Ok(())
    }
}
