//! Content-addressed page cache.
//!
//! Keys are the hex SHA-256 of the requested profile URL. Entries use the
//! storage format `identifier + "\n" + markup`, which `parser::parse_cached`
//! splits again.

use chrono::Utc;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::db;
use crate::error::CacheError;

pub fn cache_key(identifier: &str) -> String {
    hex::encode(Sha256::digest(identifier.as_bytes()))
}

/// Build the stored text for a fetched page.
pub fn entry(identifier: &str, markup: &str) -> String {
    format!("{}\n{}", identifier, markup)
}

pub trait PageCache {
    fn exists(&self, key: &str) -> Result<bool, CacheError>;
    fn read(&self, key: &str) -> Result<String, CacheError>;
    /// Writes must be atomic: a reader never observes a partial entry.
    fn write(&self, key: &str, text: &str) -> Result<(), CacheError>;
}

/// Cache backed by the `page_cache` table.
pub struct DbCache<'c> {
    conn: &'c Connection,
}

impl<'c> DbCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        DbCache { conn }
    }
}

impl PageCache for DbCache<'_> {
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(db::cache_exists(self.conn, key)?)
    }

    fn read(&self, key: &str) -> Result<String, CacheError> {
        db::cache_read(self.conn, key)?.ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, text: &str) -> Result<(), CacheError> {
        db::cache_write(self.conn, key, text, &Utc::now().to_rfc3339())?;
        Ok(())
    }
}
