// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scan history storage for SkyFare.
//!
//! Every accepted ticket scan is stored as a [`ScanRecord`] in a single
//! `SQLite` table. Records are appended, listed newest first, fetched by
//! id and deleted by id; they are never edited.
//!
//! ## Backend
//!
//! `SQLite` is bundled through `libsqlite3-sys`, so no system library is
//! needed. Migrations are embedded at compile time and applied when a
//! connection is opened.
//!
//! - [`Persistence::new_in_memory`] opens an isolated shared-cache
//!   in-memory database, one per call, for tests
//! - [`Persistence::new_with_file`] opens (or creates) a database file in
//!   WAL mode
//!
//! ## Ordering
//!
//! Timestamps are stored as Unix nanoseconds. Scans sharing a timestamp
//! fall back to insertion order, so the listing order is total.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use skyfare_domain::ScanRecord;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

// libsqlite3-sys is linked only for its bundled SQLite build
use libsqlite3_sys as _;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for scan records.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_scans_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL lets the history be read while a scan is being written
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Appends a scan record to the history.
    ///
    /// # Returns
    ///
    /// The stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if a scan with the same id exists, the record
    /// cannot be stored, or the insert fails.
    pub fn append_scan(&mut self, record: &ScanRecord) -> Result<ScanRecord, PersistenceError> {
        mutations::insert_scan(&mut self.conn, record)?;
        Ok(record.clone())
    }

    /// Retrieves a scan by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ScanNotFound` if no scan has this id.
    pub fn get_scan(&mut self, id: Uuid) -> Result<ScanRecord, PersistenceError> {
        queries::get_scan(&mut self.conn, id)
    }

    /// Lists all scans, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_scans(&mut self) -> Result<Vec<ScanRecord>, PersistenceError> {
        queries::list_scans(&mut self.conn)
    }

    /// Deletes a scan by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ScanNotFound` if no scan has this id.
    pub fn delete_scan(&mut self, id: Uuid) -> Result<(), PersistenceError> {
        mutations::delete_scan(&mut self.conn, id)
    }

    /// Counts stored scans.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_scans(&mut self) -> Result<usize, PersistenceError> {
        queries::count_scans(&mut self.conn)
    }
}
