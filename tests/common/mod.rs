// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use setmore_report::config::Config;
use setmore_report::db::DirectoryCache;
use setmore_report::AppState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create app state pointed at a mock Setmore server, with an in-memory cache.
#[allow(dead_code)]
pub fn test_state(server: &MockServer) -> AppState {
    let config = Config::test_default(&server.uri());
    AppState::with_cache(config, DirectoryCache::new_mock()).expect("Failed to build app state")
}

/// Serve `tokens` from the token endpoint, one per exchange, repeating the
/// last one once the list runs out.
#[allow(dead_code)]
pub async fn mount_tokens(server: &MockServer, tokens: &[&str]) {
    for (i, token) in tokens.iter().enumerate() {
        let mock = Mock::given(method("GET"))
            .and(path("/o/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token)));

        let mock = if i + 1 < tokens.len() {
            mock.up_to_n_times(1)
        } else {
            mock
        };
        mock.mount(server).await;
    }
}

#[allow(dead_code)]
pub fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "response": true,
        "data": { "token": { "access_token": token, "token_type": "bearer" } }
    })
}

/// A raw appointment as the API would return it.
#[allow(dead_code)]
pub fn appointment(key: &str, staff_key: &str, start: &str, duration: u32) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "staff_key": staff_key,
        "service_key": "v1",
        "customer_key": "c1",
        "start_time": start,
        "end_time": start,
        "duration": duration,
        "label": "",
        "cost": 0.0,
        "customer": { "first_name": "Ada", "last_name": "Lovelace" }
    })
}

/// Appointments page body, optionally with a continuation cursor.
#[allow(dead_code)]
pub fn page_body(appointments: Vec<serde_json::Value>, cursor: Option<&str>) -> serde_json::Value {
    let mut data = serde_json::json!({ "appointments": appointments });
    if let Some(cursor) = cursor {
        data["cursor"] = serde_json::Value::String(cursor.to_string());
    }
    serde_json::json!({ "response": true, "data": data })
}

/// The payload Setmore sends back for a stale token.
#[allow(dead_code)]
pub fn expired_body() -> serde_json::Value {
    serde_json::json!({ "response": false, "msg": "Access token expired" })
}

#[allow(dead_code)]
pub fn staff_body(staff: &[(&str, &str, &str)]) -> serde_json::Value {
    let staffs: Vec<_> = staff
        .iter()
        .map(|(key, first, last)| {
            serde_json::json!({ "key": key, "first_name": first, "last_name": last })
        })
        .collect();
    serde_json::json!({ "response": true, "data": { "staffs": staffs } })
}

#[allow(dead_code)]
pub fn services_body(services: &[(&str, &str)]) -> serde_json::Value {
    let services: Vec<_> = services
        .iter()
        .map(|(key, name)| serde_json::json!({ "key": key, "service_name": name, "duration": 30 }))
        .collect();
    serde_json::json!({ "response": true, "data": { "services": services } })
}
