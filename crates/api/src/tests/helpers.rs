// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};
use skyfare::CityIndex;
use tokio::sync::Notify;

use crate::{
    ClientConfig, FareClient, StaticToken, TokenProvider, Transport, TransportError,
    TransportResponse,
};

pub const TEST_TOKEN: &str = "test-token";

/// Scripted transport. Responses are handed out in call order.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<Url>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: &[u8]) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse {
                status,
                body: body.to_vec(),
            }));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    /// Makes the first call wait until `gate` is notified.
    pub fn gate_first_call(self, gate: Arc<Notify>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let (gate, response) = {
            self.requests.lock().unwrap().push(url.clone());
            let gate: Option<Arc<Notify>> = self.gate.lock().unwrap().take();
            let response: Option<Result<TransportResponse, TransportError>> =
                self.responses.lock().unwrap().pop_front();
            (gate, response)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        response.unwrap_or_else(|| Err(TransportError(String::from("no scripted response"))))
    }
}

pub fn create_test_config() -> ClientConfig {
    ClientConfig {
        monthly_url: String::from("https://fares.test/v1/prices/monthly"),
        directions_url: String::from("https://fares.test/v1/city-directions"),
        cities_url: String::from("https://fares.test/data/en/cities.json"),
        ..ClientConfig::default()
    }
}

pub fn create_test_client_with_token(transport: &Arc<MockTransport>, token: &str) -> FareClient {
    let tokens: Arc<dyn TokenProvider> = Arc::new(StaticToken::new(token));
    FareClient::new(transport.clone(), tokens, create_test_config())
}

pub fn create_test_client(transport: &Arc<MockTransport>) -> FareClient {
    create_test_client_with_token(transport, TEST_TOKEN)
}

pub fn create_test_catalog() -> Vec<u8> {
    json!([
        {
            "code": "MOW",
            "name": "Moscow",
            "name_translations": { "ru": "Москва" },
            "country_code": "RU"
        },
        {
            "code": "HKT",
            "name": "Phuket",
            "name_translations": { "ru": "Пхукет" },
            "country_code": "TH"
        },
        {
            "code": "AER",
            "name": "Sochi",
            "country_code": "RU"
        }
    ])
    .to_string()
    .into_bytes()
}

pub fn create_test_index() -> Arc<CityIndex> {
    let index: Arc<CityIndex> = Arc::new(CityIndex::default());
    index.load(&create_test_catalog()).unwrap();
    index
}

pub fn create_test_item(destination: &str, price: u64, departure_at: &str) -> Value {
    json!({
        "origin": "MOW",
        "destination": destination,
        "price": price,
        "transfers": 0,
        "airline": "SU",
        "flight_number": 270,
        "departure_at": departure_at,
        "expires_at": "2025-11-20T00:00:00Z"
    })
}

/// Four fares MOW → HKT priced 100, 200, 300, 400 on consecutive days.
pub fn create_monthly_payload() -> Vec<u8> {
    json!({
        "success": true,
        "currency": "usd",
        "data": {
            "2025-12-04": create_test_item("HKT", 400, "2025-12-04T10:00:00+03:00"),
            "2025-12-01": create_test_item("HKT", 100, "2025-12-01T10:00:00+03:00"),
            "2025-12-03": create_test_item("HKT", 300, "2025-12-03T10:00:00+03:00"),
            "2025-12-02": create_test_item("HKT", 200, "2025-12-02T10:00:00+03:00")
        }
    })
    .to_string()
    .into_bytes()
}

pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
