//! Content-addressed cache of extracted text.
//!
//! Keyed by the MD5 fingerprint of the raw document bytes, so byte-identical
//! uploads share one entry no matter which label or schema they arrive with.
//! Entries never expire and survive restarts. Failed extractions are stored
//! too (as `__ERROR__`-marked text): re-submitting a broken document answers
//! from the cache instead of re-running parsing and OCR.

pub mod fingerprint;

pub use fingerprint::fingerprint;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

const DB_FILE: &str = "extracted_text.db";

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Durable fingerprint → extracted-text store backed by SQLite.
///
/// Each operation opens its own connection; concurrent lookups and stores
/// from in-flight requests serialize through SQLite's file locking plus the
/// busy timeout. Same-key write races resolve last-store-wins, which is
/// safe: text computed for identical bytes is identical.
pub struct TextCache {
    db_path: PathBuf,
}

impl TextCache {
    /// Open (and initialize if needed) the cache under `dir`.
    pub fn open(dir: &Path) -> Result<Self, CacheError> {
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join(DB_FILE);
        // Run the schema migration once up front so later opens are cheap.
        let _ = connect(&db_path)?;
        Ok(Self { db_path })
    }

    /// Previously computed text for these exact bytes, if any.
    pub fn lookup(&self, bytes: &[u8]) -> Result<Option<String>, CacheError> {
        let key = fingerprint(bytes);
        let conn = connect(&self.db_path)?;
        let text = conn
            .query_row(
                "SELECT text FROM extracted_text WHERE fingerprint = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        if text.is_some() {
            tracing::debug!(fingerprint = %key, "Cache hit");
        }
        Ok(text)
    }

    /// Store computed text for these bytes (upsert, last store wins).
    pub fn store(&self, bytes: &[u8], text: &str) -> Result<(), CacheError> {
        let key = fingerprint(bytes);
        let conn = connect(&self.db_path)?;
        conn.execute(
            "INSERT INTO extracted_text (fingerprint, text) VALUES (?1, ?2)
             ON CONFLICT(fingerprint) DO UPDATE SET text = excluded.text",
            params![key, text],
        )?;
        tracing::debug!(fingerprint = %key, text_length = text.len(), "Cached extracted text");
        Ok(())
    }
}

fn connect(path: &Path) -> Result<Connection, CacheError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         CREATE TABLE IF NOT EXISTS extracted_text (
             fingerprint TEXT PRIMARY KEY,
             text        TEXT NOT NULL
         );",
    )?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::types::ERROR_MARKER;

    fn temp_cache() -> (tempfile::TempDir, TextCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::open(dir.path()).unwrap();
        (dir, cache)
    }

    #[test]
    fn store_then_lookup_round_trips() {
        let (_dir, cache) = temp_cache();
        cache.store(b"doc bytes", "extracted text").unwrap();
        assert_eq!(
            cache.lookup(b"doc bytes").unwrap().as_deref(),
            Some("extracted text")
        );
    }

    #[test]
    fn miss_returns_none() {
        let (_dir, cache) = temp_cache();
        assert_eq!(cache.lookup(b"never stored").unwrap(), None);
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = TextCache::open(dir.path()).unwrap();
            cache.store(b"persistent", "kept across restarts").unwrap();
        }
        let reopened = TextCache::open(dir.path()).unwrap();
        assert_eq!(
            reopened.lookup(b"persistent").unwrap().as_deref(),
            Some("kept across restarts")
        );
    }

    #[test]
    fn same_key_store_is_last_wins() {
        let (_dir, cache) = temp_cache();
        cache.store(b"doc", "first").unwrap();
        cache.store(b"doc", "second").unwrap();
        assert_eq!(cache.lookup(b"doc").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let (_dir, cache) = temp_cache();
        cache.store(b"doc a", "text a").unwrap();
        cache.store(b"doc b", "text b").unwrap();
        assert_eq!(cache.lookup(b"doc a").unwrap().as_deref(), Some("text a"));
        assert_eq!(cache.lookup(b"doc b").unwrap().as_deref(), Some("text b"));
    }

    #[test]
    fn error_marked_text_is_cached_like_any_text() {
        let (_dir, cache) = temp_cache();
        let marked = format!("{ERROR_MARKER} PDF parsing failed: corrupt xref");
        cache.store(b"broken doc", &marked).unwrap();
        assert_eq!(cache.lookup(b"broken doc").unwrap().as_deref(), Some(marked.as_str()));
    }
}
