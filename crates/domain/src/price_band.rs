// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quartile price banding.
//!
//! A result set of fares is split into four tiers using nearest-rank
//! quantiles: the band value for quantile `q` is the element of the sorted
//! sample at index `floor((n - 1) * q)`. No interpolation is performed, so
//! every band value is a price that actually occurs in the sample.
//!
//! ## Invariants
//!
//! - `p25 <= p50 <= p75`
//! - Each band value is a member of the input (or 0 for an empty input)
//! - A single-element sample collapses all three bands onto that element
//! - A price equal to a threshold belongs to the cheaper tier

use serde::{Deserialize, Serialize};

use crate::types::PriceTier;

/// Quantile split points over one result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PriceBand {
    /// 25th percentile.
    pub p25: u64,
    /// Median.
    pub p50: u64,
    /// 75th percentile.
    pub p75: u64,
}

impl PriceBand {
    /// Classifies a price against this band.
    #[must_use]
    pub const fn tier(&self, price: u64) -> PriceTier {
        band_of(price, self)
    }
}

/// Returns the nearest-rank element for the quantile `numerator / denominator`.
///
/// `sorted` must be non-empty and sorted ascending. Integer arithmetic gives
/// exactly `floor((n - 1) * q)` for the quartiles.
fn nearest_rank(sorted: &[u64], numerator: usize, denominator: usize) -> u64 {
    let last: usize = sorted.len() - 1;
    let index: usize = (last * numerator / denominator).min(last);
    sorted[index]
}

/// Computes the quartile band over a list of prices.
///
/// The input does not need to be sorted. An empty input yields a band of
/// zeros.
///
/// # Arguments
///
/// * `prices` - The prices in the current result set
#[must_use]
pub fn classify(prices: &[u64]) -> PriceBand {
    if prices.is_empty() {
        return PriceBand::default();
    }

    let mut sorted: Vec<u64> = prices.to_vec();
    sorted.sort_unstable();

    PriceBand {
        p25: nearest_rank(&sorted, 1, 4),
        p50: nearest_rank(&sorted, 1, 2),
        p75: nearest_rank(&sorted, 3, 4),
    }
}

/// Places a price into one of the four tiers of `band`.
///
/// Thresholds are inclusive on the cheaper side.
#[must_use]
pub const fn band_of(price: u64, band: &PriceBand) -> PriceTier {
    if price <= band.p25 {
        PriceTier::Cheapest
    } else if price <= band.p50 {
        PriceTier::Low
    } else if price <= band.p75 {
        PriceTier::Mid
    } else {
        PriceTier::High
    }
}
