// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog refresh: fetch, build on a blocking worker, publish.

use std::sync::Arc;

use skyfare::{CityCatalog, CityIndex};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fares::FareClient;

/// Builds a catalog from `catalog_bytes` off the async executor and
/// publishes it to `index`.
///
/// # Returns
///
/// The number of cities now published.
///
/// # Errors
///
/// Returns `FetchError::Decode` if the payload is not a valid catalog or
/// the build worker fails. The published catalog is unchanged on error.
pub async fn publish_catalog(
    index: &Arc<CityIndex>,
    catalog_bytes: Vec<u8>,
) -> Result<usize, FetchError> {
    let language: String = index.local_language().to_string();

    let catalog: CityCatalog =
        tokio::task::spawn_blocking(move || CityCatalog::build(&catalog_bytes, &language))
            .await
            .map_err(|e| FetchError::Decode(format!("Catalog build task failed: {e}")))??;

    Ok(index.publish(catalog))
}

/// Fetches the city catalog and publishes it to `index`.
///
/// # Errors
///
/// Returns any fetch or decode error. The published catalog is unchanged
/// on error.
pub async fn refresh_catalog(
    client: &FareClient,
    index: &Arc<CityIndex>,
) -> Result<usize, FetchError> {
    let bytes: Vec<u8> = client.fetch_catalog().await?;
    info!(bytes = bytes.len(), "Fetched city catalog");

    publish_catalog(index, bytes).await.inspect_err(|e| {
        warn!(error = %e, "Keeping previous city catalog");
    })
}
