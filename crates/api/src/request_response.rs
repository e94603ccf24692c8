// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use skyfare_domain::{City, Flight, PriceBand, ScanRecord};
use uuid::Uuid;

use crate::listing::FlightRow;

/// API request to search the city catalog by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitySearchRequest {
    /// Free-text query.
    #[serde(default)]
    pub q: String,
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// API response for a city search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySearchResponse {
    /// The query as received.
    pub query: String,
    /// Matching cities in catalog order.
    pub cities: Vec<City>,
}

/// API request to resolve free text or a code to a city code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolveCityRequest {
    /// Free text or an IATA code.
    #[serde(default)]
    pub q: String,
}

/// API response for a resolved city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveCityResponse {
    /// The query as received.
    pub query: String,
    /// The resolved IATA code.
    pub code: String,
    /// Display title of the resolved city.
    pub title: String,
}

/// API response for a city title lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTitleResponse {
    /// The code as received.
    pub code: String,
    /// Display title, or the code itself when unknown.
    pub title: String,
}

/// API response for a catalog reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReloadResponse {
    /// Number of cities now published.
    pub cities: usize,
    /// A success message.
    pub message: String,
}

/// API request for a monthly-prices listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlightSearchRequest {
    /// Origin city, as a code or free text.
    pub origin: String,
    /// Destination city, as a code or free text.
    pub destination: String,
    /// Requested currency; the configured default when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Departure-date filter, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Sequencing key. When set, a response overtaken by a newer request
    /// with the same key is reported as superseded.
    #[serde(default)]
    pub session: Option<String>,
}

/// API response for a monthly-prices listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightListingResponse {
    /// Resolved origin code.
    pub origin: String,
    /// Display title of the origin.
    pub origin_title: String,
    /// Resolved destination code.
    pub destination: String,
    /// Display title of the destination.
    pub destination_title: String,
    /// Currency of every price in the listing.
    pub currency: String,
    /// Quartiles of the listed prices.
    pub band: PriceBand,
    /// Listed flights, cheapest first.
    pub flights: Vec<FlightRow>,
}

/// API request for popular directions from one city.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopularDirectionsRequest {
    /// Origin city, as a code or free text.
    pub origin: String,
    /// Requested currency; the configured default when absent.
    #[serde(default)]
    pub currency: Option<String>,
}

/// API response for popular directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularDirectionsResponse {
    /// Resolved origin code.
    pub origin: String,
    /// Display title of the origin.
    pub origin_title: String,
    /// Currency of every price in the listing.
    pub currency: String,
    /// Quartiles of the listed prices.
    pub band: PriceBand,
    /// Listed flights, cheapest first.
    pub flights: Vec<FlightRow>,
}

/// API request to record a scanned ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureScanRequest {
    /// The decoded text of the scanned code.
    pub raw_text: String,
}

/// API response for a recorded scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureScanResponse {
    /// The stored record.
    pub scan: ScanRecord,
    /// The flight built from the scan.
    pub flight: Flight,
    /// Whether any field was recognised in the payload.
    pub recognised: bool,
}

/// API response listing stored scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistoryResponse {
    /// Stored scans, newest first.
    pub scans: Vec<ScanRecord>,
}

/// API response for the flight of a stored scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFlightResponse {
    /// The scan the flight was built from.
    pub scan_id: Uuid,
    /// The rebuilt flight.
    pub flight: Flight,
}

/// API response for a deleted scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteScanResponse {
    /// The deleted scan.
    pub scan_id: Uuid,
    /// A success message.
    pub message: String,
}
