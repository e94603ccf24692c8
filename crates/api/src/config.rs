// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fare client configuration.

use std::time::Duration;

use crate::transport::DEFAULT_TIMEOUT;

/// Monthly-prices endpoint.
pub const DEFAULT_MONTHLY_URL: &str = "https://api.travelpayouts.com/v1/prices/monthly";
/// Popular city-directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://api.travelpayouts.com/v1/city-directions";
/// City catalog.
pub const DEFAULT_CITIES_URL: &str = "https://api.travelpayouts.com/data/en/cities.json";
/// Currency requested when the caller names none.
pub const DEFAULT_REQUEST_CURRENCY: &str = "USD";

/// Endpoints and defaults used by the fare client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Monthly-prices endpoint.
    pub monthly_url: String,
    /// Popular city-directions endpoint.
    pub directions_url: String,
    /// City catalog endpoint.
    pub cities_url: String,
    /// Currency requested when the caller names none.
    pub default_currency: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            monthly_url: DEFAULT_MONTHLY_URL.to_string(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            cities_url: DEFAULT_CITIES_URL.to_string(),
            default_currency: DEFAULT_REQUEST_CURRENCY.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
