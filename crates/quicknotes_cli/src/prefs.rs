//! Presentation preferences persisted alongside the notes.
//!
//! # Responsibility
//! - Read and write the theme flag under its own storage key.
//!
//! # Invariants
//! - The theme flag never shares a key with the notes payload.
//! - Reads never fail; anything but the literal `"true"` means light theme.

use log::warn;
use quicknotes_core::{Storage, StorageResult};

/// Storage key holding the dark-theme flag.
pub const THEME_KEY: &str = "darkTheme";

/// Reads the dark-theme flag.
///
/// Missing, malformed or unreadable values fall back to the light theme.
pub fn dark_theme_enabled(storage: &impl Storage) -> bool {
    match storage.get(THEME_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(err) => {
            warn!("event=prefs_load module=cli status=error key={THEME_KEY} error={err}");
            false
        }
    }
}

/// Writes the dark-theme flag as the string `"true"` or `"false"`.
pub fn set_dark_theme(storage: &mut impl Storage, enabled: bool) -> StorageResult<()> {
    storage.set(THEME_KEY, if enabled { "true" } else { "false" })
}
