// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort decoding of scanned ticket payloads.
//!
//! A scan yields a single string. If it is a JSON object, the recognised
//! keys are picked out one by one; each either coerces cleanly or is left
//! absent. Nothing here returns an error: a garbage scan decodes to an
//! empty [`ParsedTicket`], and [`materialize`] turns any ticket into a
//! complete [`Flight`] by filling in fixed defaults.

use serde_json::{Map, Number, Value};
use skyfare_domain::{
    Flight, ScanRecord, normalize_airline_code, normalize_currency, normalize_iata_code,
};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::text::parse_timestamp;

/// Origin used when a ticket names none.
pub const DEFAULT_ORIGIN: &str = "MOW";
/// Destination used when a ticket names none.
pub const DEFAULT_DESTINATION: &str = "IST";
/// Price used when a ticket names none.
pub const DEFAULT_PRICE: u64 = 199;
/// Airline used when a ticket names none.
pub const DEFAULT_AIRLINE: &str = "SU";
/// Flight number used when a ticket names none.
pub const DEFAULT_FLIGHT_NUMBER: u32 = 1001;
/// Currency used when a ticket names none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// One raw field pulled out of a scanned JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A native JSON number.
    Number(Number),
    /// A JSON string.
    Text(String),
    /// Missing, null, or a type no field accepts.
    Absent,
}

impl FieldValue {
    /// Extracts `key` from `object`.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>, key: &str) -> Self {
        match object.get(key) {
            Some(Value::Number(n)) => Self::Number(n.clone()),
            Some(Value::String(s)) => Self::Text(s.clone()),
            _ => Self::Absent,
        }
    }

    /// Coerces to a non-negative integer.
    ///
    /// Numbers are truncated toward zero; strings must parse as integers.
    /// Negative values are absent.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                    .map(|f| f.trunc() as u64)
            }),
            Self::Text(s) => s.trim().parse::<u64>().ok(),
            Self::Absent => None,
        }
    }

    /// Coerces to trimmed, non-empty text. Numbers are not text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            Self::Number(_) | Self::Absent => None,
        }
    }
}

/// Everything that could be recovered from a scan. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTicket {
    /// Origin IATA code, uppercase.
    pub origin: Option<String>,
    /// Destination IATA code, uppercase.
    pub destination: Option<String>,
    /// Price in whole units.
    pub price: Option<u64>,
    /// Currency code, uppercase.
    pub currency: Option<String>,
    /// Outbound departure.
    pub departure_at: Option<OffsetDateTime>,
    /// Return departure.
    pub return_at: Option<OffsetDateTime>,
    /// Airline designator, uppercase.
    pub airline: Option<String>,
    /// Flight number.
    pub flight_number: Option<u32>,
}

impl ParsedTicket {
    /// Returns whether nothing at all was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Decodes a scanned payload.
///
/// Only a JSON object is understood. Any other input, including valid JSON
/// that is not an object, yields an empty ticket.
#[must_use]
pub fn decode_ticket(raw: &str) -> ParsedTicket {
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(raw) else {
        debug!(len = raw.len(), "Scan payload is not a JSON object");
        return ParsedTicket::default();
    };

    let field = |key: &str| FieldValue::from_object(&object, key);

    let parsed: ParsedTicket = ParsedTicket {
        origin: field("origin")
            .as_text()
            .and_then(|s| normalize_iata_code(s).ok()),
        destination: field("destination")
            .as_text()
            .and_then(|s| normalize_iata_code(s).ok()),
        // Prices past i64::MAX cannot be stored with the scan
        price: field("price")
            .as_count()
            .filter(|p| i64::try_from(*p).is_ok()),
        currency: field("currency")
            .as_text()
            .and_then(|s| normalize_currency(s).ok()),
        departure_at: field("departure_at").as_text().and_then(parse_timestamp),
        return_at: field("return_at").as_text().and_then(parse_timestamp),
        airline: field("airline")
            .as_text()
            .and_then(|s| normalize_airline_code(s).ok()),
        flight_number: field("flight_number")
            .as_count()
            .and_then(|n| u32::try_from(n).ok()),
    };

    debug!(recovered = !parsed.is_empty(), "Decoded scan payload");
    parsed
}

/// Builds a complete flight from a ticket, departing now when the ticket
/// has no departure.
#[must_use]
pub fn materialize(parsed: &ParsedTicket) -> Flight {
    materialize_at(parsed, OffsetDateTime::now_utc())
}

/// Builds a complete flight from a ticket using `now` as the default
/// departure.
///
/// Absent fields take the fixed defaults. The quote expires 24 hours after
/// departure. A return earlier than the departure is discarded.
#[must_use]
pub fn materialize_at(parsed: &ParsedTicket, now: OffsetDateTime) -> Flight {
    let departure_at: OffsetDateTime = parsed.departure_at.unwrap_or(now);

    Flight {
        origin: parsed
            .origin
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        destination: parsed
            .destination
            .clone()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        price: parsed.price.unwrap_or(DEFAULT_PRICE),
        transfers: 0,
        airline_iata: parsed
            .airline
            .clone()
            .unwrap_or_else(|| DEFAULT_AIRLINE.to_string()),
        flight_number: Some(parsed.flight_number.unwrap_or(DEFAULT_FLIGHT_NUMBER)),
        departure_at,
        return_at: parsed.return_at.filter(|ret| *ret >= departure_at),
        expires_at: departure_at.saturating_add(Duration::DAY),
        currency: parsed
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    }
}

/// Rebuilds a displayable flight from a stored scan.
///
/// Departure is `now`, the return leg a week later and the quote expires
/// in a day. A stored price of 0 means none was recognised.
#[must_use]
pub fn flight_for_scan(record: &ScanRecord, now: OffsetDateTime) -> Flight {
    let price: u64 = if record.price == 0 {
        DEFAULT_PRICE
    } else {
        record.price
    };

    Flight {
        origin: record
            .origin
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        destination: record
            .destination
            .clone()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        price,
        transfers: 0,
        airline_iata: DEFAULT_AIRLINE.to_string(),
        flight_number: Some(DEFAULT_FLIGHT_NUMBER),
        departure_at: now,
        return_at: Some(now.saturating_add(Duration::WEEK)),
        expires_at: now.saturating_add(Duration::DAY),
        currency: DEFAULT_CURRENCY.to_string(),
    }
}
