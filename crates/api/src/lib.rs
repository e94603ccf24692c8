// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for SkyFare.
//!
//! This crate owns everything that touches the outside world on behalf of
//! the core pipelines:
//!
//! - [`FareClient`] fetches fares and the city catalog through a
//!   [`Transport`], authenticated by a [`TokenProvider`]
//! - [`refresh_catalog`] rebuilds and republishes the [`skyfare::CityIndex`]
//! - [`RequestSequencer`] discards responses overtaken by newer requests
//! - `handlers` exposes one function per HTTP operation

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
#![allow(clippy::multiple_crate_versions)]

mod catalog;
mod config;
mod error;
mod fares;
mod handlers;
mod listing;
mod request_response;
mod sequencer;
mod token;
mod transport;

#[cfg(test)]
mod tests;

pub use catalog::{publish_catalog, refresh_catalog};
pub use config::{
    ClientConfig, DEFAULT_CITIES_URL, DEFAULT_DIRECTIONS_URL, DEFAULT_MONTHLY_URL,
    DEFAULT_REQUEST_CURRENCY,
};
pub use error::{ApiError, FetchError, translate_domain_error, translate_persistence_error};
pub use fares::{FareClient, build_url};
pub use handlers::{
    capture_scan, city_title, delete_scan, list_scans, parse_scan_id, popular_directions,
    reload_catalog, resolve_city, scan_flight, search_cities, search_flights,
};
pub use listing::{FlightListing, FlightRow, build_listing, parse_departure_date};
pub use request_response::{
    CaptureScanRequest, CaptureScanResponse, CatalogReloadResponse, CitySearchRequest,
    CitySearchResponse, CityTitleResponse, DeleteScanResponse, FlightListingResponse,
    FlightSearchRequest, PopularDirectionsRequest, PopularDirectionsResponse, ResolveCityRequest,
    ResolveCityResponse, ScanFlightResponse, ScanHistoryResponse,
};
pub use sequencer::{RequestSequencer, RequestTicket};
pub use token::{EnvToken, StaticToken, TOKEN_ENV_VAR, TokenChain, TokenFile, TokenProvider};
pub use transport::{
    DEFAULT_TIMEOUT, ReqwestTransport, Transport, TransportError, TransportResponse,
};

/// URL type accepted by [`Transport::fetch`].
pub use reqwest::Url;
