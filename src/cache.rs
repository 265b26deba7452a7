//! SQLite store of fetched passages, keyed by canonical reference.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::util::{ensure_directory, now_utc_string, sha256_text};

pub const CACHE_FILE_NAME: &str = "passages.sqlite";

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CachedPassage {
    pub reference: String,
    pub body: String,
    pub body_sha256: String,
    pub fetched_at: String,
}

pub struct PassageCache {
    connection: Connection,
}

impl PassageCache {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }

        let connection = Connection::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        configure_connection(&connection)?;
        ensure_schema(&connection)?;

        Ok(Self { connection })
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().context("failed to open in-memory passage cache")?;
        ensure_schema(&connection)?;

        Ok(Self { connection })
    }

    pub fn get(&self, reference: &str) -> Result<Option<CachedPassage>> {
        self.connection
            .query_row(
                "
                SELECT reference, body, body_sha256, fetched_at
                FROM passages
                WHERE reference = ?1
                ",
                params![reference],
                |row| {
                    Ok(CachedPassage {
                        reference: row.get(0)?,
                        body: row.get(1)?,
                        body_sha256: row.get(2)?,
                        fetched_at: row.get(3)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("failed to read cached passage for {reference}"))
    }

    /// Stores `body` under `reference`, replacing any earlier copy.
    pub fn put(&self, reference: &str, body: &str) -> Result<CachedPassage> {
        let passage = CachedPassage {
            reference: reference.to_string(),
            body: body.to_string(),
            body_sha256: sha256_text(body),
            fetched_at: now_utc_string(),
        };

        self.connection
            .execute(
                "
                INSERT INTO passages(reference, body, body_sha256, fetched_at)
                VALUES(?1, ?2, ?3, ?4)
                ON CONFLICT(reference) DO UPDATE SET
                  body=excluded.body,
                  body_sha256=excluded.body_sha256,
                  fetched_at=excluded.fetched_at
                ",
                params![
                    passage.reference,
                    passage.body,
                    passage.body_sha256,
                    passage.fetched_at,
                ],
            )
            .with_context(|| format!("failed to store passage for {reference}"))?;

        Ok(passage)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .connection
            .query_row("SELECT COUNT(*) FROM passages", [], |row| row.get(0))
            .context("failed to count cached passages")?;
        Ok(count)
    }
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
            CREATE TABLE IF NOT EXISTS passages (
              reference TEXT PRIMARY KEY,
              body TEXT NOT NULL,
              body_sha256 TEXT NOT NULL,
              fetched_at TEXT NOT NULL
            );
            ",
        )
        .context("failed to create passage cache schema")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_reference() {
        let cache = PassageCache::open_in_memory().expect("in-memory cache should open");
        assert_eq!(cache.get("Genesis 1").expect("lookup should succeed"), None);
        assert_eq!(cache.count().expect("count should succeed"), 0);
    }

    #[test]
    fn put_then_get_round_trips_and_replaces() {
        let cache = PassageCache::open_in_memory().expect("in-memory cache should open");

        let stored = cache
            .put("John 3:16", "<p>For God so loved</p>\n")
            .expect("put should succeed");
        assert_eq!(stored.body_sha256, sha256_text("<p>For God so loved</p>\n"));
        assert_eq!(
            cache.get("John 3:16").expect("lookup should succeed"),
            Some(stored)
        );

        cache
            .put("John 3:16", "<p>updated</p>\n")
            .expect("second put should succeed");
        let replaced = cache
            .get("John 3:16")
            .expect("lookup should succeed")
            .expect("passage should be cached");
        assert_eq!(replaced.body, "<p>updated</p>\n");
        assert_eq!(cache.count().expect("count should succeed"), 1);
    }

    #[test]
    fn open_creates_parent_directories_and_persists() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("nested").join(CACHE_FILE_NAME);

        {
            let cache = PassageCache::open(&path).expect("cache should open");
            cache
                .put("Psalms 23", "<p>The LORD is my shepherd</p>\n")
                .expect("put should succeed");
        }

        let reopened = PassageCache::open(&path).expect("cache should reopen");
        assert_eq!(reopened.count().expect("count should succeed"), 1);
        assert!(
            reopened
                .get("Psalms 23")
                .expect("lookup should succeed")
                .is_some()
        );
    }
}
