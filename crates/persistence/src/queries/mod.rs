// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! - `scans`: scan history lookups

pub mod scans;

pub use scans::{count_scans, get_scan, list_scans};
