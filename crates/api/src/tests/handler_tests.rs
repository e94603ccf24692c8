// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use serde_json::json;
use skyfare::CityIndex;
use skyfare_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;
use tokio::sync::Notify;
use uuid::Uuid;

use super::helpers::{
    MockTransport, create_monthly_payload, create_test_client, create_test_client_with_token,
    create_test_index, query_value,
};
use crate::{
    ApiError, CaptureScanRequest, CaptureScanResponse, CitySearchRequest, CitySearchResponse,
    FareClient, FetchError, FlightListingResponse, FlightSearchRequest, PopularDirectionsRequest,
    PopularDirectionsResponse, ResolveCityRequest, ScanFlightResponse, ScanHistoryResponse,
    capture_scan, city_title, delete_scan, list_scans, parse_scan_id, popular_directions,
    resolve_city, scan_flight, search_cities, search_flights,
};

const NOW: OffsetDateTime = datetime!(2025-11-01 12:00 UTC);

fn create_search_request(origin: &str, destination: &str) -> FlightSearchRequest {
    FlightSearchRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        currency: None,
        date: None,
        session: None,
    }
}

fn create_capture_request(raw_text: &str) -> CaptureScanRequest {
    CaptureScanRequest {
        raw_text: raw_text.to_string(),
    }
}

// ============================================================================
// Cities
// ============================================================================

#[test]
fn test_search_cities_uses_default_limit() {
    let index: Arc<CityIndex> = create_test_index();
    let request: CitySearchRequest = CitySearchRequest {
        q: String::from("o"),
        limit: None,
    };

    let response: CitySearchResponse = search_cities(&index, &request);
    let codes: Vec<&str> = response.cities.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["MOW", "AER"]);
}

#[test]
fn test_resolve_city_unknown_is_not_found() {
    let index: Arc<CityIndex> = create_test_index();
    let request: ResolveCityRequest = ResolveCityRequest {
        q: String::from("Atlantis"),
    };

    assert!(matches!(
        resolve_city(&index, &request),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_resolve_city_returns_code_and_title() {
    let index: Arc<CityIndex> = create_test_index();
    let request: ResolveCityRequest = ResolveCityRequest {
        q: String::from("sochi"),
    };

    let response = resolve_city(&index, &request).unwrap();
    assert_eq!(response.code, "AER");
    assert_eq!(response.title, "Sochi");
}

#[test]
fn test_city_title_of_unknown_code_is_code() {
    let index: Arc<CityIndex> = create_test_index();
    assert_eq!(city_title(&index, "ZZZ").title, "ZZZ");
    assert_eq!(city_title(&index, "MOW").title, "Москва");
}

// ============================================================================
// Flights
// ============================================================================

#[tokio::test]
async fn test_search_flights_resolves_names_and_bands() {
    let transport: Arc<MockTransport> =
        Arc::new(MockTransport::new().with_response(200, &create_monthly_payload()));
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let response: FlightListingResponse =
        search_flights(&client, &index, &create_search_request("Moscow", "пхукет"))
            .await
            .unwrap();

    assert_eq!(response.origin, "MOW");
    assert_eq!(response.destination, "HKT");
    assert_eq!(response.origin_title, "Москва");
    assert_eq!(response.currency, "USD");
    assert_eq!(response.flights.len(), 4);
    assert_eq!(response.band.p50, 200);

    let url = &transport.requests()[0];
    assert_eq!(query_value(url, "origin").as_deref(), Some("MOW"));
    assert_eq!(query_value(url, "destination").as_deref(), Some("HKT"));
    assert_eq!(query_value(url, "currency").as_deref(), Some("USD"));
}

#[tokio::test]
async fn test_search_flights_rejects_unresolvable_city_before_fetch() {
    let transport: Arc<MockTransport> =
        Arc::new(MockTransport::new().with_response(200, &create_monthly_payload()));
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let result: Result<FlightListingResponse, ApiError> =
        search_flights(&client, &index, &create_search_request("MOW", "Atlantis")).await;
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "destination"
    ));

    let result: Result<FlightListingResponse, ApiError> =
        search_flights(&client, &index, &create_search_request("123", "HKT")).await;
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "origin"
    ));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_search_flights_validates_currency_and_date() {
    let transport: Arc<MockTransport> = Arc::new(MockTransport::new());
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let mut request: FlightSearchRequest = create_search_request("MOW", "HKT");
    request.currency = Some(String::from("rubles"));
    assert!(matches!(
        search_flights(&client, &index, &request).await,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "currency"
    ));

    let mut request: FlightSearchRequest = create_search_request("MOW", "HKT");
    request.date = Some(String::from("next friday"));
    assert!(matches!(
        search_flights(&client, &index, &request).await,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_search_flights_applies_date_filter() {
    let transport: Arc<MockTransport> =
        Arc::new(MockTransport::new().with_response(200, &create_monthly_payload()));
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let mut request: FlightSearchRequest = create_search_request("MOW", "HKT");
    request.date = Some(String::from("2025-12-02"));
    request.currency = Some(String::from("usd"));

    let response: FlightListingResponse = search_flights(&client, &index, &request).await.unwrap();
    assert_eq!(response.flights.len(), 1);
    assert_eq!(response.flights[0].flight.price, 200);
}

#[tokio::test]
async fn test_search_flights_without_token_is_upstream_error() {
    let transport: Arc<MockTransport> = Arc::new(MockTransport::new());
    let client: FareClient = create_test_client_with_token(&transport, "");
    let index: Arc<CityIndex> = create_test_index();

    let result: Result<FlightListingResponse, ApiError> =
        search_flights(&client, &index, &create_search_request("MOW", "HKT")).await;
    assert_eq!(result, Err(ApiError::Upstream(FetchError::NoToken)));
}

#[tokio::test]
async fn test_search_flights_superseded_session() {
    let gate: Arc<Notify> = Arc::new(Notify::new());
    let transport: Arc<MockTransport> = Arc::new(
        MockTransport::new()
            .with_response(200, &create_monthly_payload())
            .with_response(200, &create_monthly_payload())
            .gate_first_call(gate.clone()),
    );
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let mut request: FlightSearchRequest = create_search_request("MOW", "HKT");
    request.session = Some(String::from("tab-1"));

    let (first, second) = tokio::join!(search_flights(&client, &index, &request), async {
        let result = search_flights(&client, &index, &request).await;
        gate.notify_one();
        result
    });

    assert_eq!(
        first,
        Err(ApiError::Superseded {
            key: String::from("tab-1")
        })
    );
    assert!(second.is_ok());
}

#[tokio::test]
async fn test_popular_directions_listing() {
    let payload: Vec<u8> = json!({
        "success": true,
        "data": {
            "AER": {"origin": "MOW", "destination": "AER", "price": 3500, "transfers": 0,
                    "airline": "DP", "departure_at": "2025-12-01T10:00:00Z",
                    "expires_at": "2025-11-20T00:00:00Z"},
            "HKT": {"origin": "MOW", "destination": "HKT", "price": 41000, "transfers": 1,
                    "airline": "SU", "departure_at": "2025-12-05T10:00:00Z",
                    "expires_at": "2025-11-20T00:00:00Z"}
        }
    })
    .to_string()
    .into_bytes();
    let transport: Arc<MockTransport> = Arc::new(MockTransport::new().with_response(200, &payload));
    let client: FareClient = create_test_client(&transport);
    let index: Arc<CityIndex> = create_test_index();

    let request: PopularDirectionsRequest = PopularDirectionsRequest {
        origin: String::from("Moscow"),
        currency: Some(String::from("rub")),
    };
    let response: PopularDirectionsResponse =
        popular_directions(&client, &index, &request).await.unwrap();

    assert_eq!(response.origin, "MOW");
    assert_eq!(response.currency, "RUB");
    let titles: Vec<&str> = response
        .flights
        .iter()
        .map(|r| r.destination_title.as_str())
        .collect();
    assert_eq!(titles, vec!["Sochi", "Пхукет"]);
}

// ============================================================================
// Scans
// ============================================================================

#[test]
fn test_capture_scan_stores_recognised_fields() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let response: CaptureScanResponse = capture_scan(
        &mut persistence,
        &create_capture_request(r#"{"origin":"LED","price":"321"}"#),
        NOW,
    )
    .unwrap();

    assert!(response.recognised);
    assert_eq!(response.scan.origin.as_deref(), Some("LED"));
    assert_eq!(response.scan.destination, None);
    assert_eq!(response.scan.price, 321);
    assert_eq!(response.scan.created_at, NOW);
    assert_eq!(response.flight.origin, "LED");
    assert_eq!(response.flight.destination, "IST");
    assert_eq!(response.flight.departure_at, NOW);

    let stored: ScanHistoryResponse = list_scans(&mut persistence).unwrap();
    assert_eq!(stored.scans, vec![response.scan]);
}

#[test]
fn test_capture_scan_keeps_unrecognised_payload() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let response: CaptureScanResponse =
        capture_scan(&mut persistence, &create_capture_request("not json"), NOW).unwrap();

    assert!(!response.recognised);
    assert_eq!(response.scan.raw_text, "not json");
    assert_eq!(response.scan.price, 0);
    assert_eq!(response.flight.price, 199);
}

#[test]
fn test_capture_scan_with_oversized_price_is_still_stored() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let response: CaptureScanResponse = capture_scan(
        &mut persistence,
        &create_capture_request(r#"{"origin":"LED","price":"9223372036854775808"}"#),
        NOW,
    )
    .unwrap();

    assert!(response.recognised);
    assert_eq!(response.scan.origin.as_deref(), Some("LED"));
    assert_eq!(response.scan.price, 0);
    assert_eq!(response.flight.price, 199);

    let stored: ScanHistoryResponse = list_scans(&mut persistence).unwrap();
    assert_eq!(stored.scans, vec![response.scan]);
}

#[test]
fn test_capture_scan_rejects_empty_text() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<CaptureScanResponse, ApiError> =
        capture_scan(&mut persistence, &create_capture_request("  "), NOW);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(list_scans(&mut persistence).unwrap().scans.is_empty());
}

#[test]
fn test_scan_history_is_newest_first() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let older: CaptureScanResponse =
        capture_scan(&mut persistence, &create_capture_request("first"), NOW).unwrap();
    let newer: CaptureScanResponse = capture_scan(
        &mut persistence,
        &create_capture_request("second"),
        NOW + time::Duration::minutes(5),
    )
    .unwrap();

    let ids: Vec<Uuid> = list_scans(&mut persistence)
        .unwrap()
        .scans
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![newer.scan.id, older.scan.id]);
}

#[test]
fn test_scan_flight_rebuilds_from_record() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let captured: CaptureScanResponse = capture_scan(
        &mut persistence,
        &create_capture_request(r#"{"destination":"AER","price":900}"#),
        NOW,
    )
    .unwrap();

    let later: OffsetDateTime = NOW + time::Duration::days(2);
    let response: ScanFlightResponse =
        scan_flight(&mut persistence, captured.scan.id, later).unwrap();

    assert_eq!(response.scan_id, captured.scan.id);
    assert_eq!(response.flight.origin, "MOW");
    assert_eq!(response.flight.destination, "AER");
    assert_eq!(response.flight.price, 900);
    assert_eq!(response.flight.departure_at, later);
}

#[test]
fn test_delete_scan_then_unknown() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let captured: CaptureScanResponse =
        capture_scan(&mut persistence, &create_capture_request("x"), NOW).unwrap();

    delete_scan(&mut persistence, captured.scan.id).unwrap();

    assert!(matches!(
        delete_scan(&mut persistence, captured.scan.id),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        scan_flight(&mut persistence, captured.scan.id, NOW),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_parse_scan_id() {
    let id: Uuid = Uuid::new_v4();
    assert_eq!(parse_scan_id(&id.to_string()).unwrap(), id);
    assert!(matches!(
        parse_scan_id("not-a-uuid"),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "id"
    ));
}
