// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use skyfare::{CityIndex, normalize_monthly_response};
use skyfare_domain::{Flight, PriceBand, PriceTier};
use time::Date;
use time::macros::date;

use super::helpers::{create_monthly_payload, create_test_index};
use crate::{ApiError, FlightListing, build_listing, parse_departure_date};

fn create_test_flights() -> Vec<Flight> {
    normalize_monthly_response(&create_monthly_payload(), "USD").unwrap()
}

#[test]
fn test_listing_assigns_tiers_and_titles() {
    let index: Arc<CityIndex> = create_test_index();

    let listing: FlightListing = build_listing(create_test_flights(), &index, None);

    assert_eq!(
        listing.band,
        PriceBand {
            p25: 100,
            p50: 200,
            p75: 300
        }
    );
    let tiers: Vec<PriceTier> = listing.rows.iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![
            PriceTier::Cheapest,
            PriceTier::Low,
            PriceTier::Mid,
            PriceTier::High
        ]
    );
    assert_eq!(listing.rows[0].origin_title, "Москва");
    assert_eq!(listing.rows[0].destination_title, "Пхукет");
}

#[test]
fn test_listing_filters_by_departure_date() {
    let index: Arc<CityIndex> = create_test_index();

    let listing: FlightListing =
        build_listing(create_test_flights(), &index, Some(date!(2025 - 12 - 03)));

    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].flight.price, 300);
    assert_eq!(listing.rows[0].tier, PriceTier::Cheapest);
    assert_eq!(
        listing.band,
        PriceBand {
            p25: 300,
            p50: 300,
            p75: 300
        }
    );
}

#[test]
fn test_listing_without_matches_is_empty() {
    let index: Arc<CityIndex> = create_test_index();

    let listing: FlightListing =
        build_listing(create_test_flights(), &index, Some(date!(2026 - 01 - 01)));

    assert!(listing.rows.is_empty());
    assert_eq!(listing.band, PriceBand::default());
}

#[test]
fn test_listing_row_serializes_flat() {
    let index: Arc<CityIndex> = create_test_index();
    let listing: FlightListing = build_listing(create_test_flights(), &index, None);

    let value: serde_json::Value = serde_json::to_value(&listing.rows[0]).unwrap();
    assert_eq!(value["origin"], "MOW");
    assert_eq!(value["price"], 100);
    assert_eq!(value["tier"], "cheapest");
    assert_eq!(value["route"], "MOW → HKT");
    assert_eq!(value["departure_at"], "2025-12-01T10:00:00+03:00");
}

#[test]
fn test_parse_departure_date() {
    let parsed: Date = parse_departure_date(" 2025-12-03 ").unwrap();
    assert_eq!(parsed, date!(2025 - 12 - 03));

    for raw in ["03.12.2025", "2025-13-01", "tomorrow", ""] {
        assert!(matches!(
            parse_departure_date(raw),
            Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
        ));
    }
}
