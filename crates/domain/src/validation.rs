// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::DomainError;
use crate::types::Flight;

/// Returns whether `code` looks like an IATA city code.
///
/// This is a format check only: three ASCII letters, any case.
#[must_use]
pub fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Validates and normalizes an IATA city code.
///
/// # Arguments
///
/// * `code` - The raw code (surrounding whitespace is ignored)
///
/// # Returns
///
/// The code in uppercase.
///
/// # Errors
///
/// Returns an error if the trimmed code is not three ASCII letters.
pub fn normalize_iata_code(code: &str) -> Result<String, DomainError> {
    let trimmed: &str = code.trim();
    if !is_iata_code(trimmed) {
        return Err(DomainError::InvalidIataCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Validates and normalizes a two-character airline designator.
///
/// Designators may mix letters and digits (e.g., "U6").
///
/// # Errors
///
/// Returns an error if the trimmed code is not two ASCII alphanumerics.
pub fn normalize_airline_code(code: &str) -> Result<String, DomainError> {
    let trimmed: &str = code.trim();
    if trimmed.len() != 2 || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidAirlineCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Validates and normalizes an ISO-4217 currency code.
///
/// # Errors
///
/// Returns an error if the trimmed code is not three ASCII letters.
pub fn normalize_currency(code: &str) -> Result<String, DomainError> {
    let trimmed: &str = code.trim();
    if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidCurrency(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Validates the structural invariants of a flight.
///
/// # Errors
///
/// Returns an error if:
/// - The currency is not three uppercase letters
/// - The return leg departs before the outbound leg
pub fn validate_flight(flight: &Flight) -> Result<(), DomainError> {
    // Rule: currency is always stored uppercase
    if normalize_currency(&flight.currency)? != flight.currency {
        return Err(DomainError::InvalidCurrency(flight.currency.clone()));
    }

    // Rule: a round trip cannot return before it leaves
    if let Some(return_at) = flight.return_at.filter(|r| *r < flight.departure_at) {
        return Err(DomainError::ReturnBeforeDeparture {
            departure_at: rfc3339(flight.departure_at),
            return_at: rfc3339(return_at),
        });
    }

    Ok(())
}

/// Formats an instant as RFC 3339. Instants RFC 3339 cannot express (years
/// outside 0000-9999) fall back to the `time` display form.
fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}
