// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{City, Flight, PriceTier, ScanRecord};
use time::macros::datetime;

fn create_test_flight() -> Flight {
    Flight {
        origin: String::from("MOW"),
        destination: String::from("HKT"),
        price: 512,
        transfers: 1,
        airline_iata: String::from("SU"),
        flight_number: Some(270),
        departure_at: datetime!(2025-12-01 10:00 UTC),
        return_at: Some(datetime!(2025-12-15 08:30 UTC)),
        expires_at: datetime!(2025-11-20 00:00 UTC),
        currency: String::from("USD"),
    }
}

#[test]
fn test_city_code_normalized_to_uppercase() {
    let city: City = City::new(" mow ", "Москва", "Moscow", "RU");
    assert_eq!(city.code, "MOW");
}

#[test]
fn test_city_title_prefers_local_name() {
    let city: City = City::new("MOW", "Москва", "Moscow", "RU");
    assert_eq!(city.title(), "Москва");
}

#[test]
fn test_city_title_falls_back_to_english_then_code() {
    let english_only: City = City::new("AMS", "", "Amsterdam", "NL");
    assert_eq!(english_only.title(), "Amsterdam");

    let bare: City = City::new("XXX", "", "", "");
    assert_eq!(bare.title(), "XXX");
}

#[test]
fn test_flight_structural_equality() {
    let a: Flight = create_test_flight();
    let b: Flight = create_test_flight();
    assert_eq!(a, b);

    let mut c: Flight = create_test_flight();
    c.flight_number = None;
    assert_ne!(a, c);
}

#[test]
fn test_flight_route_text_and_one_way() {
    let mut flight: Flight = create_test_flight();
    assert_eq!(flight.route_text(), "MOW → HKT");
    assert!(!flight.is_one_way());

    flight.return_at = None;
    assert!(flight.is_one_way());
}

#[test]
fn test_flight_serializes_timestamps_as_rfc3339() {
    let flight: Flight = create_test_flight();
    let json: serde_json::Value = serde_json::to_value(&flight).unwrap();
    assert_eq!(json["departure_at"], "2025-12-01T10:00:00Z");
    assert_eq!(json["return_at"], "2025-12-15T08:30:00Z");

    let back: Flight = serde_json::from_value(json).unwrap();
    assert_eq!(back, flight);
}

#[test]
fn test_scan_record_ids_are_unique() {
    let now = datetime!(2025-10-01 12:00 UTC);
    let a: ScanRecord = ScanRecord::new("raw", now, None, None, 0);
    let b: ScanRecord = ScanRecord::new("raw", now, None, None, 0);
    assert_ne!(a.id, b.id);
    assert_eq!(a.raw_text, "raw");
    assert_eq!(a.price, 0);
}

#[test]
fn test_price_tier_serde_names() {
    let json: String = serde_json::to_string(&PriceTier::Cheapest).unwrap();
    assert_eq!(json, "\"cheapest\"");
}
