// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

pub fn create_test_catalog() -> Vec<u8> {
    json!([
        {
            "code": "MOW",
            "name": "Moscow",
            "name_translations": { "en": "Moscow", "ru": "Москва" },
            "country_code": "RU"
        },
        {
            "code": "LED",
            "name": "Saint Petersburg",
            "name_translations": { "en": "Saint Petersburg", "ru": "Санкт-Петербург" },
            "country_code": "RU"
        },
        {
            "code": "MUC",
            "name": "München",
            "name_translations": { "ru": "Мюнхен" },
            "country_code": "DE"
        },
        {
            "code": "AMS",
            "name": "Amsterdam",
            "name_translations": null,
            "country_code": "NL"
        },
        {
            "code": "ist",
            "name": "Istanbul",
            "name_translations": { "ru": "" },
            "country_code": "TR"
        },
        {
            "code": "MCX",
            "name": "Makhachkala",
            "name_translations": { "ru": "Махачкала" },
            "country_code": "RU"
        }
    ])
    .to_string()
    .into_bytes()
}

pub fn create_test_item(price: i64, departure_at: &str) -> Value {
    json!({
        "origin": "MOW",
        "destination": "HKT",
        "price": price,
        "transfers": 1,
        "airline": "SU",
        "flight_number": 270,
        "departure_at": departure_at,
        "return_at": "2025-12-15T08:30:00+03:00",
        "expires_at": "2025-11-20T00:00:00Z"
    })
}

pub fn create_test_envelope(data: Value, currency: Option<&str>) -> Vec<u8> {
    let mut envelope: Value = json!({ "success": true, "data": data });
    if let Some(currency) = currency {
        envelope["currency"] = json!(currency);
    }
    envelope.to_string().into_bytes()
}
