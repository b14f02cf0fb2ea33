//! Shared fixtures for router-level tests.
//!
//! One wiremock server stands in for both TMDB and the Telegram Bot API.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use marquee_rs::AppState;
use marquee_rs::api::routes::create_router;
use marquee_rs::config::Settings;
use marquee_rs::external::tmdb::TmdbClient;
use marquee_rs::services::TelegramProvider;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TMDB_KEY: &str = "test-key";
pub const BOT_TOKEN: &str = "123:abc";
pub const BOUNDARY: &str = "------------------------marquee";

pub fn settings(server: &MockServer, producer: &str) -> Settings {
    let mut settings = Settings::default();
    settings.producer.kind = producer.to_string();
    settings.tmdb.api_key = TMDB_KEY.to_string();
    settings.tmdb.base_url = server.uri();
    settings.telegram.bot_token = BOT_TOKEN.to_string();
    settings.telegram.chat_id = "-1001".to_string();
    settings.telegram.api_base_url = server.uri();
    settings
}

pub fn app_with(settings: &Settings) -> Router {
    let metadata = TmdbClient::new(&settings.tmdb).expect("tmdb client");
    let notifier = TelegramProvider::new(settings.telegram.clone()).expect("telegram provider");
    let state =
        AppState::new(settings, Arc::new(metadata), Arc::new(notifier)).expect("app state");
    create_router(state, settings.server.body_limit)
}

pub fn app(server: &MockServer, producer: &str) -> Router {
    app_with(&settings(server, producer))
}

pub fn inception() -> Value {
    json!({
        "id": 27205,
        "title": "Inception",
        "overview": "A thief...",
        "poster_path": "/inception.jpg",
        "release_date": "2010-07-16",
        "vote_average": 8.8,
        "genre_ids": [28, 878]
    })
}

pub async fn mount_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/bot.+/send(Photo|Message)$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": {} })),
        )
        .mount(server)
        .await;
}

pub async fn mount_movie_search(server: &MockServer, results: Value) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// Plex-style multipart body: JSON `payload` field plus a binary `thumb`.
pub fn plex_multipart(payload: &Value) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"payload\"\r\n\
         Content-Type: application/json\r\n\
         \r\n\
         {payload}\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"thumb\"; filename=\"thumb.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\
         \r\n\
         JPEGDATA\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        payload = payload
    );

    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
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

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Bodies of every Telegram call the mock server received
pub async fn telegram_calls(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path().starts_with("/bot"))
        .map(|r| {
            let body = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
            (r.url.path().to_string(), body)
        })
        .collect()
}

/// Paths of every TMDB call the mock server received
pub async fn tmdb_calls(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| !r.url.path().starts_with("/bot"))
        .map(|r| r.url.path().to_string())
        .collect()
}
