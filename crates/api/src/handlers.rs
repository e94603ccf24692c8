// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each function is one operation of the HTTP surface with its
//! collaborators passed in explicitly. The server only extracts
//! parameters, takes locks and serializes results.

use std::sync::Arc;

use skyfare::{
    CityIndex, DEFAULT_SEARCH_LIMIT, ParsedTicket, decode_ticket, flight_for_scan, materialize_at,
};
use skyfare_domain::{City, Flight, ScanRecord, normalize_currency, normalize_iata_code};
use skyfare_persistence::Persistence;
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::catalog::refresh_catalog;
use crate::error::{ApiError, translate_domain_error};
use crate::fares::FareClient;
use crate::listing::{FlightListing, build_listing, parse_departure_date};
use crate::request_response::{
    CaptureScanRequest, CaptureScanResponse, CatalogReloadResponse, CitySearchRequest,
    CitySearchResponse, CityTitleResponse, DeleteScanResponse, FlightListingResponse,
    FlightSearchRequest, PopularDirectionsRequest, PopularDirectionsResponse, ResolveCityRequest,
    ResolveCityResponse, ScanFlightResponse, ScanHistoryResponse,
};

// ========================================================================
// Cities
// ========================================================================

/// Searches the city catalog by name.
#[must_use]
pub fn search_cities(index: &CityIndex, request: &CitySearchRequest) -> CitySearchResponse {
    let limit: usize = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let cities: Vec<City> = index.search(&request.q, limit);
    CitySearchResponse {
        query: request.q.clone(),
        cities,
    }
}

/// Resolves free text or a code to a city code.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if nothing matches.
pub fn resolve_city(
    index: &CityIndex,
    request: &ResolveCityRequest,
) -> Result<ResolveCityResponse, ApiError> {
    let code: String = index
        .resolve(&request.q)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("City"),
            message: format!("Nothing matches '{}'", request.q),
        })?;

    Ok(ResolveCityResponse {
        query: request.q.clone(),
        title: index.title_for(&code),
        code,
    })
}

/// Returns the display title for a city code.
#[must_use]
pub fn city_title(index: &CityIndex, code: &str) -> CityTitleResponse {
    CityTitleResponse {
        code: code.to_string(),
        title: index.title_for(code),
    }
}

/// Refetches the city catalog and publishes it.
///
/// # Errors
///
/// Returns `ApiError::Upstream` if the catalog cannot be fetched or
/// decoded. The previous catalog stays published.
pub async fn reload_catalog(
    client: &FareClient,
    index: &Arc<CityIndex>,
) -> Result<CatalogReloadResponse, ApiError> {
    let cities: usize = refresh_catalog(client, index).await?;
    Ok(CatalogReloadResponse {
        cities,
        message: format!("Published {cities} cities"),
    })
}

// ========================================================================
// Flights
// ========================================================================

/// Resolves a city argument and checks that the result is a real code.
fn resolve_code(index: &CityIndex, field: &str, input: &str) -> Result<String, ApiError> {
    let resolved: String = index
        .resolve(input)
        .ok_or_else(|| ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Unknown city '{input}'"),
        })?;

    normalize_iata_code(&resolved).map_err(|_| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{resolved}' is not a city code"),
    })
}

fn request_currency(client: &FareClient, requested: Option<&str>) -> Result<String, ApiError> {
    let raw: &str = requested
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(client.config().default_currency.as_str());
    normalize_currency(raw).map_err(translate_domain_error)
}

/// Fetches monthly prices between two cities and builds a banded listing.
///
/// # Errors
///
/// Returns an error if:
/// - Either city cannot be resolved, or the currency or date is malformed
/// - The fetch fails (`ApiError::Upstream`)
/// - The request carries a session key and a newer request for it started
///   meanwhile (`ApiError::Superseded`)
pub async fn search_flights(
    client: &FareClient,
    index: &CityIndex,
    request: &FlightSearchRequest,
) -> Result<FlightListingResponse, ApiError> {
    let origin: String = resolve_code(index, "origin", &request.origin)?;
    let destination: String = resolve_code(index, "destination", &request.destination)?;
    let currency: String = request_currency(client, request.currency.as_deref())?;
    let date: Option<Date> = request
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(parse_departure_date)
        .transpose()?;

    let flights: Vec<Flight> = match request.session.as_deref() {
        Some(key) => client
            .fetch_monthly_latest(key, &origin, &destination, &currency)
            .await?
            .ok_or_else(|| ApiError::Superseded {
                key: key.to_string(),
            })?,
        None => {
            client
                .fetch_monthly(&origin, &destination, &currency)
                .await?
        }
    };

    let listing: FlightListing = build_listing(flights, index, date);
    Ok(FlightListingResponse {
        origin_title: index.title_for(&origin),
        destination_title: index.title_for(&destination),
        origin,
        destination,
        currency,
        band: listing.band,
        flights: listing.rows,
    })
}

/// Fetches the popular destinations from one city as a banded listing.
///
/// # Errors
///
/// Returns an error if the origin cannot be resolved, the currency is
/// malformed, or the fetch fails.
pub async fn popular_directions(
    client: &FareClient,
    index: &CityIndex,
    request: &PopularDirectionsRequest,
) -> Result<PopularDirectionsResponse, ApiError> {
    let origin: String = resolve_code(index, "origin", &request.origin)?;
    let currency: String = request_currency(client, request.currency.as_deref())?;

    let flights: Vec<Flight> = client.fetch_popular_directions(&origin, &currency).await?;
    let listing: FlightListing = build_listing(flights, index, None);

    Ok(PopularDirectionsResponse {
        origin_title: index.title_for(&origin),
        origin,
        currency,
        band: listing.band,
        flights: listing.rows,
    })
}

// ========================================================================
// Scans
// ========================================================================

/// Parses a scan id from a path segment.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if `raw` is not a UUID.
pub fn parse_scan_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|e| ApiError::InvalidInput {
        field: String::from("id"),
        message: format!("'{raw}' is not a scan id: {e}"),
    })
}

/// Decodes a scanned payload, stores it and returns the flight built from it.
///
/// Undecodable payloads are still stored; their flight is all defaults.
///
/// # Arguments
///
/// * `persistence` - The scan store
/// * `request` - The scanned text
/// * `now` - The scan time, also the default departure
///
/// # Errors
///
/// Returns an error if the text is empty or the record cannot be stored.
pub fn capture_scan(
    persistence: &mut Persistence,
    request: &CaptureScanRequest,
    now: OffsetDateTime,
) -> Result<CaptureScanResponse, ApiError> {
    if request.raw_text.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("raw_text"),
            message: String::from("Scanned text must not be empty"),
        });
    }

    let parsed: ParsedTicket = decode_ticket(&request.raw_text);
    let flight: Flight = materialize_at(&parsed, now);
    let record: ScanRecord = ScanRecord::new(
        &request.raw_text,
        now,
        parsed.origin.clone(),
        parsed.destination.clone(),
        parsed.price.unwrap_or(0),
    );

    let scan: ScanRecord = persistence.append_scan(&record)?;
    info!(id = %scan.id, recognised = !parsed.is_empty(), "Captured scan");

    Ok(CaptureScanResponse {
        scan,
        flight,
        recognised: !parsed.is_empty(),
    })
}

/// Lists stored scans, newest first.
///
/// # Errors
///
/// Returns an error if the history cannot be read.
pub fn list_scans(persistence: &mut Persistence) -> Result<ScanHistoryResponse, ApiError> {
    Ok(ScanHistoryResponse {
        scans: persistence.list_scans()?,
    })
}

/// Rebuilds the displayable flight of a stored scan.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no scan has this id.
pub fn scan_flight(
    persistence: &mut Persistence,
    id: Uuid,
    now: OffsetDateTime,
) -> Result<ScanFlightResponse, ApiError> {
    let record: ScanRecord = persistence.get_scan(id)?;
    Ok(ScanFlightResponse {
        scan_id: record.id,
        flight: flight_for_scan(&record, now),
    })
}

/// Deletes a stored scan.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no scan has this id.
pub fn delete_scan(persistence: &mut Persistence, id: Uuid) -> Result<DeleteScanResponse, ApiError> {
    persistence.delete_scan(id)?;
    Ok(DeleteScanResponse {
        scan_id: id,
        message: format!("Deleted scan {id}"),
    })
}
