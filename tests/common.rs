// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides router builders against stub upstream servers and request/response helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors
#![allow(dead_code)]

//! Shared test utilities for `aria_proxy`
//!
//! Routers here are wired against test endpoints (usually a wiremock server)
//! so the OAuth handshake and catalog proxying can be exercised end to end
//! without touching the real platforms.

use aria_proxy::{
    config::oauth::{ProviderCredentials, ProviderEndpoints},
    oauth::{
        providers::{DeezerProvider, SpotifyProvider},
        OAuthProvider,
    },
    routes,
};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const TEST_CLIENT_ID: &str = "test_client_id";
pub const TEST_CLIENT_SECRET: &str = "test_client_secret";

/// Credentials accepted by the stub upstream
pub fn test_credentials(redirect_path: &str) -> ProviderCredentials {
    ProviderCredentials {
        client_id: Some(TEST_CLIENT_ID.into()),
        client_secret: Some(TEST_CLIENT_SECRET.into()),
        redirect_uri: Some(format!("http://localhost:8888{redirect_path}")),
    }
}

/// The Basic authorization header value the Spotify provider should send
pub fn expected_basic_auth() -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{TEST_CLIENT_ID}:{TEST_CLIENT_SECRET}"))
    )
}

/// Spotify routes wired against a stub upstream base URL
pub fn spotify_router(base_url: &str) -> Router {
    init_test_logging();
    let endpoints = ProviderEndpoints {
        authorize_url: format!("{base_url}/authorize"),
        token_url: format!("{base_url}/api/token"),
        api_base: base_url.to_owned(),
    };
    let provider: Arc<dyn OAuthProvider> = Arc::new(
        SpotifyProvider::with_endpoints(&test_credentials("/spotify/callback"), endpoints)
            .expect("test credentials are complete"),
    );
    routes::provider_routes(provider)
}

/// Deezer routes wired against a stub upstream base URL
pub fn deezer_router(base_url: &str) -> Router {
    init_test_logging();
    let endpoints = ProviderEndpoints {
        authorize_url: format!("{base_url}/oauth/auth.php"),
        token_url: format!("{base_url}/oauth/access_token.php"),
        api_base: base_url.to_owned(),
    };
    let provider: Arc<dyn OAuthProvider> = Arc::new(
        DeezerProvider::with_endpoints(&test_credentials("/deezer/callback"), endpoints)
            .expect("test credentials are complete"),
    );
    routes::provider_routes(provider)
}

/// GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// GET request carrying a Cookie header
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("valid request")
}

/// POST request with a JSON body
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// The Location header of a redirect response
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// All Set-Cookie header values
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect()
}

/// Value of a named cookie set by the response, if any
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    set_cookies(response).iter().find_map(|cookie| {
        let (pair, _) = cookie.split_once(';').unwrap_or((cookie, ""));
        let (cookie_name, value) = pair.split_once('=')?;
        (cookie_name == name).then(|| value.to_owned())
    })
}

/// Whether the response clears the named cookie
pub fn clears_cookie(response: &Response, name: &str) -> bool {
    set_cookies(response).iter().any(|cookie| {
        cookie.starts_with(&format!("{name}=")) && cookie.contains("Max-Age=0")
    })
}

/// Collect the response body as JSON
pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Collect the response body as text
pub async fn response_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8_lossy(&bytes).into_owned()
}
