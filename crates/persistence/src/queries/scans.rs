// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scan history queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use skyfare_domain::ScanRecord;
use tracing::debug;
use uuid::Uuid;

use crate::data_models::ScanRow;
use crate::diesel_schema::scans;
use crate::error::PersistenceError;

/// Retrieves a scan by id.
///
/// # Errors
///
/// Returns `PersistenceError::ScanNotFound` if no scan has this id, or an
/// error if the query fails or the stored row is unreadable.
pub fn get_scan(conn: &mut SqliteConnection, id: Uuid) -> Result<ScanRecord, PersistenceError> {
    debug!(%id, "Looking up scan");

    let row: Option<ScanRow> = scans::table
        .filter(scans::scan_id.eq(id.to_string()))
        .select(ScanRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::ScanNotFound(id.to_string()))?
        .try_into()
}

/// Lists every stored scan, newest first.
///
/// Scans with the same timestamp are ordered by insertion, most recent
/// first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is unreadable.
pub fn list_scans(conn: &mut SqliteConnection) -> Result<Vec<ScanRecord>, PersistenceError> {
    let rows: Vec<ScanRow> = scans::table
        .order((scans::created_at_ns.desc(), scans::scan_seq.desc()))
        .select(ScanRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded scan history");
    rows.into_iter().map(ScanRecord::try_from).collect()
}

/// Counts stored scans.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_scans(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = scans::table.count().get_result(conn)?;
    usize::try_from(count)
        .map_err(|_| PersistenceError::QueryFailed(format!("Invalid scan count: {count}")))
}
