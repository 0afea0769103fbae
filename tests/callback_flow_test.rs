// ABOUTME: Integration tests for the authorization callback against a stub token endpoint
// ABOUTME: Covers state validation, token exchange, fragment delivery, and upstream failure mirroring
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

async fn spotify_token_mock(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", expected_basic_auth()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT",
            "refresh_token": "RT",
            "expires_in": 3600
        })))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn mismatched_state_is_rejected_without_exchange() {
    let server = MockServer::start().await;
    spotify_token_mock(&server, 0).await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get_with_cookie(
            "/callback?code=abc&state=forgedforgedforg",
            "spotify_auth_state=genuinegenuinege",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/#error=state_mismatch");
    assert!(clears_cookie(&response, "spotify_auth_state"));
}

#[tokio::test]
async fn missing_state_cookie_is_rejected_without_exchange() {
    let server = MockServer::start().await;
    spotify_token_mock(&server, 0).await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get("/callback?code=abc&state=genuinegenuinege"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/#error=state_mismatch");
}

#[tokio::test]
async fn valid_state_exchanges_code_and_delivers_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", expected_basic_auth()))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT",
            "refresh_token": "RT",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get_with_cookie(
            "/callback?code=abc&state=genuinegenuinege",
            "spotify_auth_state=genuinegenuinege",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/#access_token=AT&refresh_token=RT");
    assert!(clears_cookie(&response, "spotify_auth_state"));
}

#[tokio::test]
async fn login_then_callback_roundtrip() {
    let server = MockServer::start().await;
    spotify_token_mock(&server, 1).await;
    let app = spotify_router(&server.uri());

    let login = app.clone().oneshot(get("/login")).await.unwrap();
    let state = cookie_value(&login, "spotify_auth_state").expect("state cookie set");

    let response = app
        .oneshot(get_with_cookie(
            &format!("/callback?code=abc&state={state}"),
            &format!("spotify_auth_state={state}"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(location(&response).starts_with("/#access_token="));
}

#[tokio::test]
async fn valid_state_without_code_is_invalid_input() {
    let server = MockServer::start().await;
    spotify_token_mock(&server, 0).await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get_with_cookie(
            "/callback?state=genuinegenuinege",
            "spotify_auth_state=genuinegenuinege",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn exchange_failure_mirrors_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let app = spotify_router(&server.uri());

    let response = app
        .oneshot(get_with_cookie(
            "/callback?code=abc&state=genuinegenuinege",
            "spotify_auth_state=genuinegenuinege",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("503"));
    assert_eq!(body["error"]["upstream_status"], 503);
}

#[tokio::test]
async fn deezer_callback_exchanges_with_plain_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/access_token.php"))
        .and(body_string_contains(format!("app_id={TEST_CLIENT_ID}")))
        .and(body_string_contains(format!("secret={TEST_CLIENT_SECRET}")))
        .and(body_string_contains("output=json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "DZ_AT",
            "expires": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = deezer_router(&server.uri());

    let response = app
        .oneshot(get_with_cookie(
            "/callback?code=abc&state=genuinegenuinege",
            "deezer_auth_state=genuinegenuinege",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    // No refresh token in the fragment: Deezer never issues one
    assert_eq!(location(&response), "/#access_token=DZ_AT");
    assert!(clears_cookie(&response, "deezer_auth_state"));
}
