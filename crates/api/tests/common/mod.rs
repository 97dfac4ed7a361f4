#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use surveydesk_api::config::ServerConfig;
use surveydesk_api::router::build_app_router;
use surveydesk_api::state::AppState;
use surveydesk_core::export::{export_offset, DEFAULT_UTC_OFFSET_MINUTES};
use surveydesk_core::rating::RatingKey;
use surveydesk_core::survey::SurveyResponse;
use surveydesk_db::store::MemoryResponseStore;
use tower::ServiceExt;

/// Password configured for every test app.
pub const TEST_PASSWORD: &str = "letmein";

/// `Cookie` header value carrying the dashboard flag.
pub const AUTH_COOKIE: &str = "dashboard_authenticated=true";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        dashboard_password: TEST_PASSWORD.to_string(),
        page_size: 20,
        export_offset: export_offset(DEFAULT_UTC_OFFSET_MINUTES).unwrap(),
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryResponseStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// A store seeded with `count` records, newest first: `User 1` is the most
/// recent.
pub fn seeded_store(count: i64) -> Arc<MemoryResponseStore> {
    let base = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap();
    let records = (1..=count)
        .map(|i| SurveyResponse {
            id: i,
            name: format!("User {i}"),
            email: format!("user{i}@acme.io"),
            responses: RatingKey::ALL
                .iter()
                .map(|k| (k.as_str().to_string(), (i % 6).to_string()))
                .collect::<BTreeMap<_, _>>(),
            suggestions: (i % 2 == 0).then(|| format!("Suggestion {i}")),
            created_at: base - Duration::minutes(i),
        })
        .collect();
    Arc::new(MemoryResponseStore::with_records(records))
}

/// A complete, valid urlencoded survey body.
pub fn valid_form_body(name: &str, email: &str) -> String {
    let mut body = format!(
        "name={}&email={}",
        urlencoding::encode(name),
        urlencoding::encode(email)
    );
    for key in RatingKey::ALL {
        body.push_str(&format!("&{}=4", key.as_str()));
    }
    body.push_str("&suggestions=Keep+it+up");
    body
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// GET with the dashboard flag set.
pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, AUTH_COOKIE)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
