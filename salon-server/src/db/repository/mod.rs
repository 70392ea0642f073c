//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

pub mod booking;
pub mod product;

// Re-exports
pub use booking::BookingRepository;
pub use product::ProductRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::sql::Thing;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Version conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// API 层只暴露纯 key (例如 "k3b9x0qz1m7d2f4h8j6p")，不带表名前缀。
// 也接受 "booking:k3b9..." 形式，前缀会被剥离。
// key 由 SurrealDB 生成，只包含 ASCII 字母和数字。

/// Longest key accepted from a request
const MAX_KEY_LEN: usize = 64;

/// Validate an id from a request and return the pure key
///
/// Returns `None` for anything SurrealDB could not have generated.
pub fn parse_key<'a>(table: &str, raw: &'a str) -> Option<&'a str> {
    let key = raw
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(raw);
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(key)
}

/// Build a record id from a table name and a pure key
pub fn make_thing(table: &str, key: &str) -> Thing {
    Thing::from((table.to_string(), key.to_string()))
}

/// Pure key of a record id (no table prefix, no escaping)
pub fn record_key(thing: &Thing) -> String {
    thing.id.to_raw()
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Any>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }

    /// All records of a table, newest first
    pub async fn find_all_newest_first<T: DeserializeOwned>(&self, table: &str) -> RepoResult<Vec<T>> {
        let records: Vec<T> = self
            .db
            .query("SELECT * FROM type::table($table) ORDER BY created_at DESC")
            .bind(("table", table.to_string()))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Replace a record only if its stored version still equals `expected_version`
    ///
    /// `content` must carry the new version and no id. An empty result means the
    /// record changed (or vanished) after it was read.
    pub async fn replace_if_version<T>(
        &self,
        table: &str,
        key: &str,
        content: T,
        expected_version: u64,
    ) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let mut result = self
            .db
            .query("UPDATE $thing CONTENT $content WHERE version = $version RETURN AFTER")
            .bind(("thing", make_thing(table, key)))
            .bind(("content", content))
            .bind(("version", expected_version))
            .await?
            .check()?;
        let updated: Vec<T> = result.take(0)?;

        updated.into_iter().next().ok_or_else(|| {
            RepoError::Conflict(format!(
                "{table} {key} was modified by another request (expected version {expected_version})"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_accepts_generated_keys() {
        assert_eq!(parse_key("booking", "k3b9x0qz1m7d2f4h8j6p"), Some("k3b9x0qz1m7d2f4h8j6p"));
        assert_eq!(parse_key("booking", "booking:abc123"), Some("abc123"));
    }

    #[test]
    fn test_parse_key_rejects_malformed() {
        assert_eq!(parse_key("booking", ""), None);
        assert_eq!(parse_key("booking", "booking:"), None);
        assert_eq!(parse_key("booking", "abc-123"), None);
        assert_eq!(parse_key("booking", "product:abc"), None);
        assert_eq!(parse_key("booking", "a b"), None);
        assert_eq!(parse_key("booking", &"x".repeat(65)), None);
    }

    #[test]
    fn test_record_key_roundtrip() {
        let thing = make_thing("product", "abc123");
        assert_eq!(thing.tb, "product");
        assert_eq!(record_key(&thing), "abc123");
    }
}
