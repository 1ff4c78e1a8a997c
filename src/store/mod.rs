//! Durable context store over a single-file SQLite database.
//!
//! [`ContextStore`] owns one connection and maps each derived id to
//! `(summary, embedding blob, timestamp)`. Retrieval is a full scan: every
//! row's blob is decoded and scored against the query vector in memory, then
//! ranked by cosine similarity. The store is a single-owner resource; the
//! dispatcher serializes access behind a mutex.

pub mod schema;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{MemoryError, Result, StoreOp};
use crate::vector;

/// A stored row, as returned by [`ContextStore::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub id: String,
    pub summary: String,
    pub embedding: Vec<u8>,
    pub timestamp: i64,
}

pub struct ContextStore {
    conn: Option<Connection>,
    dimensions: usize,
}

impl ContextStore {
    /// Open (or create) the database at `path`, with schema initialized and
    /// an integrity probe run. `dimensions` fixes the vector dimension every
    /// stored blob must decode to.
    pub fn open(path: impl AsRef<Path>, dimensions: usize) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MemoryError::store(
                        StoreOp::Open,
                        format!("failed to create directory {}: {e}", parent.display()),
                    )
                })?;
            }
        }

        let conn = Connection::open(path).map_err(open_err)?;

        // WAL for concurrent readers; wait for locks instead of failing.
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(open_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(open_err)?;
        conn.pragma_update(None, "busy_timeout", "5000")
            .map_err(open_err)?;

        Self::init(conn, dimensions)
    }

    /// Open an in-memory database. Used by tests and embedding hosts that do
    /// not want durable state.
    pub fn open_in_memory(dimensions: usize) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(open_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(open_err)?;
        Self::init(conn, dimensions)
    }

    fn init(conn: Connection, dimensions: usize) -> Result<Self> {
        schema::init_schema(&conn).map_err(open_err)?;

        let integrity: String = conn
            .pragma_query_value(None, "quick_check", |row| row.get(0))
            .map_err(open_err)?;
        if integrity != "ok" {
            return Err(MemoryError::store(
                StoreOp::Open,
                format!("database integrity check failed: {integrity}"),
            ));
        }

        Ok(Self {
            conn: Some(conn),
            dimensions,
        })
    }

    /// Vector dimension this store was opened with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Release the underlying connection. Further operations fail with
    /// [`MemoryError::StoreClosed`]. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .map_err(|(_, e)| MemoryError::Internal(format!("failed to close store: {e}")))?;
        }
        Ok(())
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(MemoryError::StoreClosed)
    }

    /// Insert or fully replace the row keyed by `id`.
    pub fn put(&self, id: &str, summary: &str, embedding: &[u8], timestamp: i64) -> Result<()> {
        self.write_row(StoreOp::Put, id, summary, embedding, timestamp)
    }

    /// Same UPSERT as [`put`](Self::put), reported as a replace failure on
    /// error so logs distinguish the two call sites.
    pub fn replace(&self, id: &str, summary: &str, embedding: &[u8], timestamp: i64) -> Result<()> {
        self.write_row(StoreOp::Replace, id, summary, embedding, timestamp)
    }

    fn write_row(
        &self,
        op: StoreOp,
        id: &str,
        summary: &str,
        embedding: &[u8],
        timestamp: i64,
    ) -> Result<()> {
        let conn = self.conn()?;

        if summary.is_empty() {
            return Err(MemoryError::store(op, "summary must not be empty"));
        }
        let decoded = vector::decode_vector(embedding).map_err(|e| MemoryError::store(op, e))?;
        if decoded.len() != self.dimensions {
            return Err(MemoryError::store(
                op,
                format!(
                    "embedding has {} dimensions, store expects {}",
                    decoded.len(),
                    self.dimensions
                ),
            ));
        }

        conn.execute(
            "INSERT OR REPLACE INTO context_memory (id, summary_text, embedding, timestamp) \
             VALUES (?1, ?2, ?3, ?4)",
            params![id, summary, embedding, timestamp],
        )
        .map_err(|e| MemoryError::store(op, e))?;

        Ok(())
    }

    /// Rank every stored entry against `query` by cosine similarity and
    /// return up to `limit` summaries, best first. Equal scores keep
    /// most-recent-first order. Any row whose blob fails to decode, whose
    /// dimension disagrees with the query, or whose vector has zero norm
    /// fails the whole search; results are never silently partial.
    pub fn search(&self, query: &[f32], limit: usize) -> Result<Vec<String>> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, summary_text, embedding FROM context_memory \
                 ORDER BY timestamp DESC, rowid DESC",
            )
            .map_err(search_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                ))
            })
            .map_err(search_err)?;

        let mut scored: Vec<(String, f64)> = Vec::new();
        for row in rows {
            let (id, summary, blob) = row.map_err(search_err)?;
            let stored = vector::decode_vector(&blob)
                .map_err(|e| MemoryError::store(StoreOp::Search, format!("entry {id}: {e}")))?;
            let similarity = vector::cosine_similarity(query, &stored)
                .map_err(|e| MemoryError::store(StoreOp::Search, format!("entry {id}: {e}")))?;
            scored.push((summary, similarity));
        }

        // Stable sort: ties keep the enumeration order (most recent first).
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored.into_iter().map(|(summary, _)| summary).collect())
    }

    /// Remove the row with the given id. Succeeds even when the id was not
    /// present.
    pub fn delete(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM context_memory WHERE id = ?1", params![id])
            .map_err(|e| MemoryError::store(StoreOp::Delete, e))?;
        Ok(())
    }

    /// Remove every row in one statement. Returns how many were removed.
    pub fn clear(&self) -> Result<u64> {
        let conn = self.conn()?;
        let deleted = conn
            .execute("DELETE FROM context_memory", [])
            .map_err(|e| MemoryError::store(StoreOp::Clear, e))?;
        Ok(deleted as u64)
    }

    /// Number of stored entries.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM context_memory", [], |row| row.get(0))
            .map_err(search_err)?;
        Ok(count as u64)
    }

    /// Fetch a single row by id.
    pub fn get(&self, id: &str) -> Result<Option<ContextEntry>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, summary_text, embedding, timestamp FROM context_memory WHERE id = ?1",
            params![id],
            |row| {
                Ok(ContextEntry {
                    id: row.get(0)?,
                    summary: row.get(1)?,
                    embedding: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(search_err)
    }
}

fn open_err(e: rusqlite::Error) -> MemoryError {
    MemoryError::store(StoreOp::Open, e)
}

fn search_err(e: impl std::fmt::Display) -> MemoryError {
    MemoryError::store(StoreOp::Search, e)
}
