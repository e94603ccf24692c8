// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turns a normalized flight list into a price-banded listing.

use serde::Serialize;
use skyfare::CityIndex;
use skyfare_domain::{Flight, PriceBand, PriceTier, band_of, classify};
use time::Date;
use time::macros::format_description;

use crate::error::ApiError;

/// One listing row: the flight plus what a reader needs to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRow {
    /// The flight itself.
    #[serde(flatten)]
    pub flight: Flight,
    /// Where the price falls within this listing.
    pub tier: PriceTier,
    /// `ORIGIN → DESTINATION` label.
    pub route: String,
    /// Display title of the origin city.
    pub origin_title: String,
    /// Display title of the destination city.
    pub destination_title: String,
}

/// A listing and the band its tiers were computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightListing {
    /// Quartiles of the listed prices.
    pub band: PriceBand,
    /// Rows in the input order (price order for normalized input).
    pub rows: Vec<FlightRow>,
}

/// Builds a listing.
///
/// When `departure_date` is given, only flights departing on that calendar
/// date (in the flight's own offset) are kept. The band is computed over
/// the kept flights only.
#[must_use]
pub fn build_listing(
    flights: Vec<Flight>,
    index: &CityIndex,
    departure_date: Option<Date>,
) -> FlightListing {
    let kept: Vec<Flight> = flights
        .into_iter()
        .filter(|flight| departure_date.is_none_or(|date| flight.departure_at.date() == date))
        .collect();

    let prices: Vec<u64> = kept.iter().map(|flight| flight.price).collect();
    let band: PriceBand = classify(&prices);

    let rows: Vec<FlightRow> = kept
        .into_iter()
        .map(|flight| FlightRow {
            tier: band_of(flight.price, &band),
            route: flight.route_text(),
            origin_title: index.title_for(&flight.origin),
            destination_title: index.title_for(&flight.destination),
            flight,
        })
        .collect();

    FlightListing { band, rows }
}

/// Parses a `YYYY-MM-DD` departure-date filter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if `raw` is not a calendar date.
pub fn parse_departure_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
        }
    })
}
