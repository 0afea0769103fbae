// ABOUTME: OAuth module organizing the authorization-code handshake core
// ABOUTME: Defines the provider trait, token types, state nonce generation, and error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # OAuth Handshake Core
//!
//! The provider-generic part of the proxy: one trait covering the
//! authorization-code handshake (authorize URL, code exchange, token refresh)
//! plus upstream catalog request construction, with Spotify and Deezer as
//! variant implementations. The callback state machine shared by all
//! providers lives in [`flow`].

/// Callback state machine and cookie helpers
pub mod flow;

/// Concrete provider implementations
pub mod providers;

use crate::catalog::CatalogRequest;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::oauth::STATE_LENGTH;

/// Access/refresh token pair produced by a provider's token endpoint
///
/// Transient: relayed to the browser and never retained by this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// OAuth error types
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Authorization callback carried no code")]
    MissingAuthorizationCode,

    #[error("Token exchange failed: {status}: {status_text}")]
    TokenExchangeFailed { status: u16, status_text: String },

    #[error("Token refresh failed: {status}: {status_text}")]
    TokenRefreshFailed { status: u16, status_text: String },

    #[error("{0} does not support token refresh")]
    RefreshNotSupported(&'static str),

    #[error("Malformed token response: {0}")]
    InvalidResponse(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Generate the anti-CSRF state nonce binding an authorization request to its
/// callback
///
/// Fixed-length random string over `A-Za-z0-9`, matching the value stored in
/// the state cookie and echoed back by the provider.
#[must_use]
pub fn generate_state() -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..STATE_LENGTH)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

/// Polymorphic OAuth provider capability
///
/// One implementation per platform. The handshake state machine and the
/// catalog executor are written against this trait only; everything
/// platform-specific (credential encoding, scope delimiters, where the bearer
/// token travels) stays inside the implementations.
#[async_trait::async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Provider name used in mount paths, logs, and error messages
    fn name(&self) -> &'static str;

    /// Name of the cookie holding the state nonce for this provider
    fn state_cookie(&self) -> &'static str;

    /// Build the browser-facing authorize URL carrying the state nonce
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorize endpoint is not a valid URL
    fn authorize_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchange an authorization code for a token pair
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success upstream status,
    /// or an unparseable token response
    async fn exchange_code(&self, code: &str) -> Result<TokenPair, OAuthError>;

    /// Exchange a refresh token for a new access token
    ///
    /// Stateless and safe to call repeatedly; each call is independent.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success upstream status,
    /// or when the platform has no refresh grant
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError>;

    /// Build the upstream request for a catalog operation, with the access
    /// token attached wherever this platform expects it
    fn resource_request(&self, access_token: &str, request: &CatalogRequest)
        -> reqwest::RequestBuilder;
}
