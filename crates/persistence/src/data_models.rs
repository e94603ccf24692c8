// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use skyfare_domain::ScanRecord;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diesel_schema::scans;
use crate::error::PersistenceError;

/// Diesel Queryable struct for scan rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = scans)]
pub struct ScanRow {
    pub scan_seq: i64,
    pub scan_id: String,
    pub raw_text: String,
    pub created_at_ns: i64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub price: i64,
}

/// Column values for a scan about to be inserted.
#[derive(Debug, Insertable)]
#[diesel(table_name = scans)]
pub struct NewScanRow<'a> {
    pub scan_id: String,
    pub raw_text: &'a str,
    pub created_at_ns: i64,
    pub origin: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub price: i64,
}

impl<'a> NewScanRow<'a> {
    /// Converts a record into storable column values.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if the timestamp or price
    /// does not fit in a signed 64-bit column.
    pub fn from_record(record: &'a ScanRecord) -> Result<Self, PersistenceError> {
        let created_at_ns: i64 = i64::try_from(record.created_at.unix_timestamp_nanos())
            .map_err(|_| {
                PersistenceError::InvalidRecord(format!(
                    "created_at {} is out of range",
                    record.created_at
                ))
            })?;
        let price: i64 = i64::try_from(record.price).map_err(|_| {
            PersistenceError::InvalidRecord(format!("price {} is out of range", record.price))
        })?;

        Ok(Self {
            scan_id: record.id.to_string(),
            raw_text: &record.raw_text,
            created_at_ns,
            origin: record.origin.as_deref(),
            destination: record.destination.as_deref(),
            price,
        })
    }
}

impl TryFrom<ScanRow> for ScanRecord {
    type Error = PersistenceError;

    fn try_from(row: ScanRow) -> Result<Self, Self::Error> {
        let id: Uuid = Uuid::parse_str(&row.scan_id).map_err(|e| {
            PersistenceError::InvalidRecord(format!(
                "scan_id '{}' in row {}: {e}",
                row.scan_id, row.scan_seq
            ))
        })?;
        let created_at: OffsetDateTime =
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(row.created_at_ns)).map_err(
                |e| PersistenceError::InvalidRecord(format!("created_at of {id}: {e}")),
            )?;
        let price: u64 = u64::try_from(row.price).map_err(|_| {
            PersistenceError::InvalidRecord(format!("price {} of {id}", row.price))
        })?;

        Ok(Self {
            id,
            raw_text: row.raw_text,
            created_at,
            origin: row.origin,
            destination: row.destination,
            price,
        })
    }
}
