// ABOUTME: Integration tests for the stateless token refresh endpoint
// ABOUTME: Covers Spotify refresh grants, Deezer's unsupported refresh, and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn spotify_refresh_returns_new_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", expected_basic_auth()))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=RT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "NEW_AT",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get("/refresh_token?refresh_token=RT"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({ "access_token": "NEW_AT" }));
}

#[tokio::test]
async fn refresh_is_repeatable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "NEW_AT"
        })))
        .expect(2)
        .mount(&server)
        .await;
    let app = spotify_router(&server.uri());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get("/refresh_token?refresh_token=RT"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn spotify_refresh_failure_mirrors_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get("/refresh_token?refresh_token=expired"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["upstream_status"], 400);
}

#[tokio::test]
async fn deezer_refresh_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/access_token.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = deezer_router(&server.uri());

    let response = app
        .oneshot(get("/refresh_token?refresh_token=RT"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("does not support token refresh"));
}

#[tokio::test]
async fn empty_refresh_token_is_rejected() {
    let app = spotify_router("http://upstream.test");

    let response = app
        .oneshot(get("/refresh_token?refresh_token="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}
