// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport seam.
//!
//! Everything that talks to the network goes through [`Transport`], so the
//! fare client can be driven by a scripted transport in tests. Query
//! parameters are already encoded into the URL by the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

/// A response that reached us, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request did not produce a response (connect, timeout, TLS, body read).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Performs a single GET.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the status and body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was received.
    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client: Client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let response: reqwest::Response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError(e.without_url().to_string()))?;

        let status: u16 = response.status().as_u16();
        let body: Vec<u8> = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.without_url().to_string()))?
            .to_vec();

        debug!(status, bytes = body.len(), path = url.path(), "Received response");
        Ok(TransportResponse { status, body })
    }
}
