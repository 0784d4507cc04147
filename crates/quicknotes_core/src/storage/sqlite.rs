//! SQLite key-value storage backend.
//!
//! # Responsibility
//! - Open and bootstrap the database used as the primary durable medium.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Bootstrap state is tracked via `PRAGMA user_version`.
//! - Databases stamped with a version newer than this build knows are
//!   rejected instead of being read or rewritten.

use super::{Storage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const KV_SCHEMA_VERSION: u32 = 1;
const KV_BOOTSTRAP_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// SQLite-backed key-value storage.
///
/// One `kv_entries` row per key; the notes sequence lives in a single row.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens a database file (creating it if needed) and bootstraps the
    /// key-value table.
    ///
    /// # Side effects
    /// - Emits `storage_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a fresh in-memory database and bootstraps the key-value table.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    fn open_with(
        mode: &str,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=storage_open module=storage status=start mode={mode}");

        let opened = open()
            .map_err(StorageError::from)
            .and_then(|conn| bootstrap(&conn).map(|()| conn));

        match opened {
            Ok(conn) => {
                info!(
                    "event=storage_open module=storage status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn bootstrap(conn: &Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version > KV_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: KV_SCHEMA_VERSION,
        });
    }

    if db_version < KV_SCHEMA_VERSION {
        conn.execute_batch(KV_BOOTSTRAP_SQL)?;
        conn.execute_batch(&format!("PRAGMA user_version = {KV_SCHEMA_VERSION};"))?;
    }

    Ok(())
}
