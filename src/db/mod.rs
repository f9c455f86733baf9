//! Database module for SQLite operations
//!
//! This module handles all database interactions:
//! - Schema creation (run once at startup)
//! - Appending completed quiz sessions to the `predictions` table
//!
//! Connections are short-lived: every operation opens the file, does its
//! work and drops the connection again, so no lock outlives a request.

pub mod schema;
pub mod queries;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to serialize guesses: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Handle to the SQLite file backing the quiz
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Point at a database file, creating it if needed
    pub fn new(path: PathBuf) -> Result<Self, DbError> {
        // Fail early on unwritable locations instead of at the first save
        Connection::open(&path)?;
        Ok(Self { path })
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<(), DbError> {
        self.with_connection(|conn| schema::create_tables(conn))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection, run `f` with it and release it
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Connection) -> Result<T, DbError>,
    {
        let mut conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        f(&mut conn)
    }

    /// Store one completed session and return its row id
    pub fn append_prediction(
        &self,
        declared_age: u32,
        declared_profession: &str,
        guesses: &[u32],
    ) -> Result<i64, DbError> {
        self.with_connection(|conn| {
            queries::insert_prediction(conn, declared_age, declared_profession, guesses)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("predictions.db")).unwrap();

        db.initialize().unwrap();
        db.initialize().unwrap();

        assert!(db.path().exists());
    }

    #[test]
    fn test_new_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::new(dir.path().join("missing").join("predictions.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_append_prediction_returns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("predictions.db")).unwrap();
        db.initialize().unwrap();

        let first = db.append_prediction(34, "nurse", &[20, 41, 67]).unwrap();
        let second = db.append_prediction(52, "pilot", &[25, 38, 70]).unwrap();

        assert!(second > first);
    }
}
