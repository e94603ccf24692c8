// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use skyfare_domain::ScanRecord;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_timestamp() -> OffsetDateTime {
    datetime!(2025-11-01 12:00:00.123456789 +03:00)
}

pub fn create_test_scan(created_at: OffsetDateTime) -> ScanRecord {
    ScanRecord::new(
        r#"{"origin":"LED","destination":"AER","price":4500}"#,
        created_at,
        Some(String::from("LED")),
        Some(String::from("AER")),
        4500,
    )
}
