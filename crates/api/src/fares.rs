// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fare provider client.
//!
//! Each fetch is a single GET: build the URL, send it through the
//! [`Transport`], reject non-2xx statuses, then hand the body to the core
//! normalizer. The token is checked before anything touches the network.

use std::sync::Arc;

use reqwest::Url;
use skyfare::{normalize_monthly_response, normalize_popular_directions};
use skyfare_domain::Flight;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::sequencer::{RequestSequencer, RequestTicket};
use crate::token::TokenProvider;
use crate::transport::{Transport, TransportResponse};

/// Client for the monthly-prices, popular-directions and catalog endpoints.
pub struct FareClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
    config: ClientConfig,
    sequencer: RequestSequencer,
}

impl std::fmt::Debug for FareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FareClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FareClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `transport` - Performs the HTTP requests
    /// * `tokens` - Supplies the API token for fare requests
    /// * `config` - Endpoints and defaults
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            tokens,
            config,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the sequencer used by [`Self::fetch_monthly_latest`].
    #[must_use]
    pub const fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Fetches monthly prices between two cities, sorted by price.
    ///
    /// # Arguments
    ///
    /// * `origin` - Origin IATA code
    /// * `destination` - Destination IATA code
    /// * `currency` - Requested currency
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is configured (`FetchError::NoToken`, nothing is sent)
    /// - The URL cannot be built
    /// - The request fails or returns a non-2xx status
    /// - The body cannot be decoded, or reports `success: false`
    pub async fn fetch_monthly(
        &self,
        origin: &str,
        destination: &str,
        currency: &str,
    ) -> Result<Vec<Flight>, FetchError> {
        let token: String = self.tokens.token().ok_or(FetchError::NoToken)?;
        let url: Url = build_url(
            &self.config.monthly_url,
            &[
                ("currency", currency),
                ("origin", origin),
                ("destination", destination),
                ("token", &token),
            ],
        )?;

        let body: Vec<u8> = self.get(&url).await?;
        let flights: Vec<Flight> = normalize_monthly_response(&body, currency)?;
        info!(
            origin,
            destination,
            count = flights.len(),
            "Fetched monthly prices"
        );
        Ok(flights)
    }

    /// Fetches the popular destinations from `origin`, sorted by price.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_monthly`].
    pub async fn fetch_popular_directions(
        &self,
        origin: &str,
        currency: &str,
    ) -> Result<Vec<Flight>, FetchError> {
        let token: String = self.tokens.token().ok_or(FetchError::NoToken)?;
        let url: Url = build_url(
            &self.config.directions_url,
            &[("currency", currency), ("origin", origin), ("token", &token)],
        )?;

        let body: Vec<u8> = self.get(&url).await?;
        let flights: Vec<Flight> = normalize_popular_directions(&body, currency)?;
        info!(origin, count = flights.len(), "Fetched popular directions");
        Ok(flights)
    }

    /// Like [`Self::fetch_monthly`], but returns `Ok(None)` if another
    /// request for `key` started while this one was in flight.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_monthly`]. Errors of superseded requests are
    /// reported as well.
    pub async fn fetch_monthly_latest(
        &self,
        key: &str,
        origin: &str,
        destination: &str,
        currency: &str,
    ) -> Result<Option<Vec<Flight>>, FetchError> {
        let ticket: RequestTicket = self.sequencer.begin(key);
        let result: Result<Vec<Flight>, FetchError> =
            self.fetch_monthly(origin, destination, currency).await;
        let is_latest: bool = self.sequencer.finish(&ticket);
        let flights: Vec<Flight> = result?;

        if is_latest {
            Ok(Some(flights))
        } else {
            debug!(key = ticket.key(), "Discarding superseded monthly prices");
            Ok(None)
        }
    }

    /// Fetches the raw city catalog. No token is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, or the request fails or
    /// returns a non-2xx status.
    pub async fn fetch_catalog(&self) -> Result<Vec<u8>, FetchError> {
        let url: Url = build_url(&self.config.cities_url, &[])?;
        self.get(&url).await
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!(host = url.host_str(), path = url.path(), "Sending request");

        let response: TransportResponse = self
            .transport
            .fetch(url)
            .await
            .map_err(|e| FetchError::Transport(e.0))?;

        if !response.is_success() {
            return Err(FetchError::BadStatus(response.status));
        }
        Ok(response.body)
    }
}

/// Parses `base` and appends `params` as an encoded query string.
///
/// # Errors
///
/// Returns `FetchError::BadUrl` if `base` is not an absolute URL.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    if params.is_empty() {
        return Url::parse(base).map_err(|e| FetchError::BadUrl(format!("{base}: {e}")));
    }
    Url::parse_with_params(base, params).map_err(|e| FetchError::BadUrl(format!("{base}: {e}")))
}
