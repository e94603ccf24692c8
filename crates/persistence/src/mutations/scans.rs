// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scan history mutations.
//!
//! Scan rows are append-only: a scan is inserted once and later deleted
//! as a whole. There is no update path.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use skyfare_domain::ScanRecord;
use tracing::{debug, info};
use uuid::Uuid;

use crate::data_models::NewScanRow;
use crate::diesel_schema::scans;
use crate::error::PersistenceError;

/// Inserts a scan record.
///
/// # Errors
///
/// Returns an error if:
/// - A scan with the same id is already stored (`PersistenceError::DuplicateScan`)
/// - The record cannot be represented in the table
/// - The insert fails
pub fn insert_scan(conn: &mut SqliteConnection, record: &ScanRecord) -> Result<(), PersistenceError> {
    let row: NewScanRow<'_> = NewScanRow::from_record(record)?;

    diesel::insert_into(scans::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateScan(record.id.to_string())
            }
            other => PersistenceError::from(other),
        })?;

    info!(id = %record.id, price = record.price, "Stored scan");
    Ok(())
}

/// Deletes a scan by id.
///
/// # Errors
///
/// Returns `PersistenceError::ScanNotFound` if no scan has this id, or an
/// error if the delete fails.
pub fn delete_scan(conn: &mut SqliteConnection, id: Uuid) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(scans::table.filter(scans::scan_id.eq(id.to_string()))).execute(conn)?;

    if deleted == 0 {
        debug!(%id, "Delete requested for unknown scan");
        return Err(PersistenceError::ScanNotFound(id.to_string()));
    }

    info!(%id, "Deleted scan");
    Ok(())
}
