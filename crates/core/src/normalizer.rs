// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fare payload normalization.
//!
//! Both the monthly-prices and the popular-directions endpoints answer with
//! the same envelope:
//!
//! ```text
//! { "success": bool, "data": { key: item, ... }, "error": string?, "currency": string? }
//! ```
//!
//! Each item is converted on its own. Items with an unparseable departure
//! or expiry are dropped; everything else about an item is best-effort.
//! The result is sorted by price with a stable sort. `data` is decoded into
//! an ordered map, so equal prices come out in key order regardless of how
//! the provider ordered its keys.

use std::collections::BTreeMap;

use serde::Deserialize;
use skyfare_domain::{Flight, normalize_currency, validate_flight};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::CoreError;
use crate::text::parse_timestamp;

/// Message reported when a failed envelope carries no error text.
const DEFAULT_BACKEND_MESSAGE: &str = "error";

#[derive(Debug, Deserialize)]
struct FareEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<BTreeMap<String, FareItem>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FareItem {
    origin: String,
    destination: String,
    price: i64,
    transfers: i64,
    airline: String,
    #[serde(default)]
    flight_number: Option<i64>,
    departure_at: String,
    #[serde(default)]
    return_at: Option<String>,
    expires_at: String,
}

/// How to fill a missing flight number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightNumberPolicy {
    /// Keep it absent.
    Preserve,
    /// Substitute 0.
    DefaultToZero,
}

/// Normalizes a monthly-prices response into flights sorted by price.
///
/// # Arguments
///
/// * `payload` - The raw response body
/// * `requested_currency` - The currency the request asked for; used when
///   the response does not name one
///
/// # Errors
///
/// Returns an error if:
/// - The payload is not a valid envelope (`CoreError::Decode`)
/// - The envelope reports `success: false` (`CoreError::Backend`)
/// - No valid currency can be determined (`CoreError::DomainViolation`)
pub fn normalize_monthly_response(
    payload: &[u8],
    requested_currency: &str,
) -> Result<Vec<Flight>, CoreError> {
    normalize(payload, requested_currency, FlightNumberPolicy::Preserve)
}

/// Normalizes a popular-directions response into flights sorted by price.
///
/// Identical to [`normalize_monthly_response`] except that a missing flight
/// number becomes `Some(0)`.
///
/// # Errors
///
/// Same as [`normalize_monthly_response`].
pub fn normalize_popular_directions(
    payload: &[u8],
    requested_currency: &str,
) -> Result<Vec<Flight>, CoreError> {
    normalize(payload, requested_currency, FlightNumberPolicy::DefaultToZero)
}

fn normalize(
    payload: &[u8],
    requested_currency: &str,
    policy: FlightNumberPolicy,
) -> Result<Vec<Flight>, CoreError> {
    let envelope: FareEnvelope = serde_json::from_slice(payload)?;

    if !envelope.success {
        let message: String = envelope
            .error
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_MESSAGE.to_string());
        return Err(CoreError::Backend(message));
    }

    let data: BTreeMap<String, FareItem> = envelope
        .data
        .ok_or_else(|| CoreError::Decode(String::from("missing field `data`")))?;

    let currency_source: &str = envelope
        .currency
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(requested_currency);
    let currency: String = normalize_currency(currency_source)?;

    let total: usize = data.len();
    let mut flights: Vec<Flight> = data
        .into_iter()
        .filter_map(|(key, item)| convert_item(&key, item, &currency, policy))
        .collect();

    // Stable: equal prices keep key order
    flights.sort_by_key(|flight| flight.price);

    debug!(
        total,
        kept = flights.len(),
        currency = %currency,
        "Normalized fare response"
    );
    Ok(flights)
}

/// Converts one item, or returns `None` if it must be dropped.
fn convert_item(
    key: &str,
    item: FareItem,
    currency: &str,
    policy: FlightNumberPolicy,
) -> Option<Flight> {
    let Some(departure_at) = parse_timestamp(&item.departure_at) else {
        debug!(key, value = %item.departure_at, "Dropping item with bad departure_at");
        return None;
    };
    let Some(expires_at) = parse_timestamp(&item.expires_at) else {
        debug!(key, value = %item.expires_at, "Dropping item with bad expires_at");
        return None;
    };
    let (Ok(price), Ok(transfers)) = (u64::try_from(item.price), u32::try_from(item.transfers))
    else {
        debug!(
            key,
            price = item.price,
            transfers = item.transfers,
            "Dropping item with negative counts"
        );
        return None;
    };

    let return_at: Option<OffsetDateTime> = item.return_at.as_deref().and_then(parse_timestamp);

    let flight_number: Option<u32> = match (item.flight_number, policy) {
        (Some(number), _) => u32::try_from(number).ok(),
        (None, FlightNumberPolicy::Preserve) => None,
        (None, FlightNumberPolicy::DefaultToZero) => Some(0),
    };

    let mut flight: Flight = Flight {
        origin: item.origin.trim().to_uppercase(),
        destination: item.destination.trim().to_uppercase(),
        price,
        transfers,
        airline_iata: item.airline.trim().to_uppercase(),
        flight_number,
        departure_at,
        return_at,
        expires_at,
        currency: currency.to_string(),
    };

    if let Err(e) = validate_flight(&flight) {
        debug!(key, error = %e, "Treating item as one-way");
        flight.return_at = None;
    }

    Some(flight)
}
