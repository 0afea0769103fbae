// ABOUTME: OAuth flow route handlers: login redirect, logout, callback, token refresh
// ABOUTME: Provider-generic handlers driving the shared callback state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! OAuth flow routes
//!
//! - `GET /login` - set the state cookie, 302 to the provider consent page
//! - `GET /logout` - clear the state cookie, 302 to `/`
//! - `GET /callback` - validate state, exchange the code, redirect with tokens
//!   in the URL fragment
//! - `GET /refresh_token` - exchange a refresh token for a new access token

use crate::errors::AppError;
use crate::oauth::{
    self,
    flow::{self, CallbackDisposition},
    OAuthProvider,
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// OAuth flow routes for one provider
pub struct AuthRoutes;

/// Query parameters on the provider's callback redirect
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Query parameters on the refresh endpoint
#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub refresh_token: String,
}

impl AuthRoutes {
    /// Create the OAuth flow routes
    pub fn routes(provider: Arc<dyn OAuthProvider>) -> Router {
        Router::new()
            .route("/login", get(Self::handle_login))
            .route("/logout", get(Self::handle_logout))
            .route("/callback", get(Self::handle_callback))
            .route("/refresh_token", get(Self::handle_refresh_token))
            .with_state(provider)
    }

    /// Handle the authorization redirect
    ///
    /// Generates a fresh state nonce, binds it to the browser via the state
    /// cookie, and redirects to the provider's consent page.
    async fn handle_login(
        State(provider): State<Arc<dyn OAuthProvider>>,
        jar: CookieJar,
    ) -> Result<Response, AppError> {
        let state = oauth::generate_state();
        let url = provider
            .authorize_url(&state)
            .map_err(|e| AppError::config(e.to_string()))?;

        info!(provider = provider.name(), "issuing authorization redirect");

        let jar = jar.add(flow::state_cookie(provider.state_cookie(), state));
        Ok((jar, found(&url)).into_response())
    }

    /// Handle logout: drop the state cookie and return to the root
    async fn handle_logout(
        State(provider): State<Arc<dyn OAuthProvider>>,
        jar: CookieJar,
    ) -> Response {
        let jar = flow::clear_state_cookie(jar, provider.state_cookie());
        (jar, found("/")).into_response()
    }

    /// Handle the provider's callback redirect
    ///
    /// The state cookie is consumed unconditionally: whatever the outcome,
    /// this authorization attempt is over.
    async fn handle_callback(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Query(params): Query<CallbackParams>,
        jar: CookieJar,
    ) -> Response {
        let stored_state = jar
            .get(provider.state_cookie())
            .map(|cookie| cookie.value().to_owned());
        let jar = flow::clear_state_cookie(jar, provider.state_cookie());

        let outcome = flow::run_callback(
            provider.as_ref(),
            stored_state.as_deref(),
            params.state.as_deref(),
            params.code.as_deref(),
        )
        .await;

        match outcome {
            Ok(CallbackDisposition::Rejected) => {
                let location = format!("/#{}", flow::error_fragment());
                (jar, found(&location)).into_response()
            }
            Ok(CallbackDisposition::Completed(pair)) => {
                let location = format!("/#{}", flow::token_fragment(&pair));
                (jar, found(&location)).into_response()
            }
            Err(e) => (jar, AppError::from(e).into_response()).into_response(),
        }
    }

    /// Handle a token refresh
    ///
    /// Stateless pass-through to the provider's token endpoint; safe to call
    /// repeatedly.
    async fn handle_refresh_token(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Query(params): Query<RefreshParams>,
    ) -> Result<Response, AppError> {
        if params.refresh_token.trim().is_empty() {
            return Err(AppError::missing_field("refresh_token"));
        }

        let pair = provider.refresh_token(&params.refresh_token).await?;

        Ok(Json(serde_json::json!({ "access_token": pair.access_token })).into_response())
    }
}

/// 302 Found redirect
///
/// `axum::response::Redirect` issues 303/307; the browser flow here follows
/// the conventional OAuth 302.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
