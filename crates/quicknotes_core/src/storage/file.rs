//! File-per-key storage backend.
//!
//! # Responsibility
//! - Map each key to one plain UTF-8 file under a root directory.
//!
//! # Invariants
//! - A missing file reads as an absent key, never as an error.
//! - The root directory is created lazily on the first write.

use super::{Storage, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Plain-file key-value storage rooted at one directory.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `root`. No I/O happens until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }
}
