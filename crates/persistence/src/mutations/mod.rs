// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations for the persistence layer.
//!
//! - `scans`: appending and deleting scan records

pub mod scans;

pub use scans::{delete_scan, insert_scan};
