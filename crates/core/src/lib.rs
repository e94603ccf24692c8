// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion core for SkyFare.
//!
//! Three independent pipelines turn untrusted external input into the
//! strict records of `skyfare_domain`:
//!
//! - [`CityIndex`] loads the city catalog and resolves free text to codes
//! - [`normalize_monthly_response`] turns fare payloads into sorted flights
//! - [`decode_ticket`] / [`materialize`] turn a scanned string into a flight
//!
//! Price banding lives in `skyfare_domain` because it is a pure function of
//! the flight list.

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

mod city_index;
mod error;
mod normalizer;
mod text;
mod ticket;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use city_index::{CityCatalog, CityIndex, DEFAULT_LOCAL_LANGUAGE, DEFAULT_SEARCH_LIMIT};
pub use error::CoreError;
pub use normalizer::{normalize_monthly_response, normalize_popular_directions};
pub use text::{fold, parse_timestamp};
pub use ticket::{
    DEFAULT_AIRLINE, DEFAULT_CURRENCY, DEFAULT_DESTINATION, DEFAULT_FLIGHT_NUMBER,
    DEFAULT_ORIGIN, DEFAULT_PRICE, FieldValue, ParsedTicket, decode_ticket, flight_for_scan,
    materialize, materialize_at,
};
