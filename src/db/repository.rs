use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PersistenceError, PersistenceResult};
use crate::models::{Effort, Sprint};
use crate::store::repository::{Repository, EFFORTS_KEY, SPRINTS_KEY};

// ─── Key-value table ─────────────────────────────────────────────────────────

pub struct KvRepo;

impl KvRepo {
    pub fn get(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

// ─── JSON collections ────────────────────────────────────────────────────────

/// Stores each collection as one JSON array under its key.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// The schema must already exist, see [`run_migrations`](super::run_migrations).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn load_list<T: DeserializeOwned>(&self, key: &'static str) -> PersistenceResult<Vec<T>> {
        match KvRepo::get(&self.conn, key)? {
            None => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|source| PersistenceError::Json { key, source }),
        }
    }

    fn save_list<T: Serialize>(&self, key: &'static str, items: &[T]) -> PersistenceResult<()> {
        let blob =
            serde_json::to_string(items).map_err(|source| PersistenceError::Json { key, source })?;
        KvRepo::set(&self.conn, key, &blob)?;
        Ok(())
    }
}

impl Repository for SqliteRepository {
    fn load_sprints(&self) -> PersistenceResult<Vec<Sprint>> {
        self.load_list(SPRINTS_KEY)
    }

    fn save_sprints(&mut self, sprints: &[Sprint]) -> PersistenceResult<()> {
        self.save_list(SPRINTS_KEY, sprints)
    }

    fn load_efforts(&self) -> PersistenceResult<Vec<Effort>> {
        self.load_list(EFFORTS_KEY)
    }

    fn save_efforts(&mut self, efforts: &[Effort]) -> PersistenceResult<()> {
        self.save_list(EFFORTS_KEY, efforts)
    }
}
