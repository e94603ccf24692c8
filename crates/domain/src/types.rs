// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A city from the travel catalog.
///
/// Cities are keyed by their IATA code, which is always stored uppercase.
/// A city never changes after it has been loaded; a catalog refresh
/// replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    /// The IATA city code (e.g., "MOW").
    pub code: String,
    /// The name in the local script. May be empty when the catalog
    /// carries no translation for the configured language.
    pub display_name_local: String,
    /// The English name.
    pub display_name_english: String,
    /// The ISO country code (e.g., "RU").
    pub country_code: String,
}

impl City {
    /// Creates a new `City`, uppercasing the code.
    #[must_use]
    pub fn new(
        code: &str,
        display_name_local: &str,
        display_name_english: &str,
        country_code: &str,
    ) -> Self {
        Self {
            code: code.trim().to_uppercase(),
            display_name_local: display_name_local.to_string(),
            display_name_english: display_name_english.to_string(),
            country_code: country_code.to_string(),
        }
    }

    /// Returns the best display title for this city.
    ///
    /// Prefers the local-script name, then the English name, and finally
    /// the bare code so the result is never empty.
    #[must_use]
    pub fn title(&self) -> &str {
        if !self.display_name_local.is_empty() {
            &self.display_name_local
        } else if !self.display_name_english.is_empty() {
            &self.display_name_english
        } else {
            &self.code
        }
    }
}

/// A single fare offer.
///
/// Flights are immutable value records. Equality is structural over every
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flight {
    /// Origin IATA code.
    pub origin: String,
    /// Destination IATA code.
    pub destination: String,
    /// Price in whole units of `currency`.
    pub price: u64,
    /// Number of transfers (0 for a direct flight).
    pub transfers: u32,
    /// Two-character airline designator.
    pub airline_iata: String,
    /// Flight number, when the provider reported one.
    pub flight_number: Option<u32>,
    /// Outbound departure.
    #[serde(with = "time::serde::rfc3339")]
    pub departure_at: OffsetDateTime,
    /// Return departure. `None` for one-way fares.
    #[serde(with = "time::serde::rfc3339::option")]
    pub return_at: Option<OffsetDateTime>,
    /// When the fare quote stops being valid.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// Uppercase ISO-4217 currency code.
    pub currency: String,
}

impl Flight {
    /// Returns the `ORIGIN → DESTINATION` route label.
    #[must_use]
    pub fn route_text(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// Returns whether this is a one-way fare.
    #[must_use]
    pub const fn is_one_way(&self) -> bool {
        self.return_at.is_none()
    }
}

/// A persisted record of one ticket scan.
///
/// Scan records are created once per successful scan and deleted by the
/// user. They are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The decoded text exactly as it came off the scanner.
    pub raw_text: String,
    /// When the scan happened.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Origin recognised in the payload, if any.
    pub origin: Option<String>,
    /// Destination recognised in the payload, if any.
    pub destination: Option<String>,
    /// Price recognised in the payload, 0 when none was found.
    pub price: u64,
}

impl ScanRecord {
    /// Creates a new scan record with a fresh random identifier.
    ///
    /// # Arguments
    ///
    /// * `raw_text` - The scanned text
    /// * `created_at` - The scan time
    /// * `origin` - Recognised origin code
    /// * `destination` - Recognised destination code
    /// * `price` - Recognised price (0 if absent)
    #[must_use]
    pub fn new(
        raw_text: &str,
        created_at: OffsetDateTime,
        origin: Option<String>,
        destination: Option<String>,
        price: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_text: raw_text.to_string(),
            created_at,
            origin,
            destination,
            price,
        }
    }
}

/// The four price tiers a fare can fall into relative to its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// At or below the 25th percentile.
    Cheapest,
    /// At or below the median.
    Low,
    /// At or below the 75th percentile.
    Mid,
    /// Above the 75th percentile.
    High,
}

impl PriceTier {
    /// Converts this tier to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cheapest => "cheapest",
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
