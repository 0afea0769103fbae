// ABOUTME: OAuth configuration types for music platform authentication
// ABOUTME: Handles Spotify and Deezer client credentials and endpoint settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

use crate::constants::{deezer, spotify};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use tracing::{info, warn};

/// OAuth provider configuration for music platforms
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OAuthConfig {
    /// Spotify OAuth configuration
    pub spotify: ProviderCredentials,
    /// Deezer OAuth configuration
    pub deezer: ProviderCredentials,
}

impl OAuthConfig {
    /// Load OAuth configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            spotify: ProviderCredentials::load_spotify(),
            deezer: ProviderCredentials::load_deezer(),
        }
    }
}

/// OAuth provider-specific credentials
///
/// Fields are optional at load time so a process can start with one provider
/// configured; provider construction fails with a typed error when a flow
/// actually needs missing credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderCredentials {
    /// OAuth client ID (app ID for Deezer)
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// OAuth redirect URI registered with the provider
    pub redirect_uri: Option<String>,
}

impl ProviderCredentials {
    /// Load Spotify credentials, falling back to the generic variable names
    #[must_use]
    pub fn load_spotify() -> Self {
        Self {
            client_id: env::var("SPOTIFY_CLIENT_ID")
                .or_else(|_| env::var("CLIENT_ID"))
                .ok(),
            client_secret: env::var("SPOTIFY_CLIENT_SECRET")
                .or_else(|_| env::var("CLIENT_SECRET"))
                .ok(),
            redirect_uri: env::var("REDIRECT_URI_SPOTIFY").ok(),
        }
    }

    /// Load Deezer credentials, falling back to the generic variable names
    #[must_use]
    pub fn load_deezer() -> Self {
        Self {
            client_id: env::var("DEEZER_APP_ID")
                .or_else(|_| env::var("APP_ID"))
                .ok(),
            client_secret: env::var("DEEZER_SECRET")
                .or_else(|_| env::var("SECRET"))
                .ok(),
            redirect_uri: env::var("REDIRECT_URI_DEEZER").ok(),
        }
    }

    /// Compute SHA256 fingerprint of client secret for debugging (first 8 hex chars)
    /// This allows comparing secrets without logging actual values
    #[must_use]
    pub fn secret_fingerprint(&self) -> Option<String> {
        self.client_secret.as_ref().map(|secret| {
            let mut hasher = Sha256::new();
            hasher.update(secret.as_bytes());
            let result = hasher.finalize();
            format!("{result:x}").chars().take(8).collect()
        })
    }

    /// Validate credentials and log diagnostics
    /// Returns true if credentials appear complete
    pub fn validate_and_log(&self, provider_name: &str) -> bool {
        let complete = matches!(
            (&self.client_id, &self.client_secret, &self.redirect_uri),
            (Some(id), Some(secret), Some(uri))
                if !id.is_empty() && !secret.is_empty() && !uri.is_empty()
        );

        if complete {
            info!(
                provider = provider_name,
                secret_fingerprint = self.secret_fingerprint().as_deref().unwrap_or("none"),
                "OAuth credentials loaded"
            );
        } else {
            warn!(
                provider = provider_name,
                "OAuth credentials incomplete; flows for this provider will fail with a configuration error"
            );
        }

        complete
    }
}

/// Endpoint settings for one provider, overridable for tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Browser-facing authorize endpoint
    pub authorize_url: String,
    /// Server-to-server token endpoint
    pub token_url: String,
    /// REST API base for catalog calls
    pub api_base: String,
}

impl ProviderEndpoints {
    /// Production Spotify endpoints
    #[must_use]
    pub fn spotify() -> Self {
        Self {
            authorize_url: spotify::AUTHORIZE_URL.into(),
            token_url: spotify::TOKEN_URL.into(),
            api_base: spotify::API_BASE.into(),
        }
    }

    /// Production Deezer endpoints
    #[must_use]
    pub fn deezer() -> Self {
        Self {
            authorize_url: deezer::AUTHORIZE_URL.into(),
            token_url: deezer::TOKEN_URL.into(),
            api_base: deezer::API_BASE.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_fingerprint_is_stable_and_short() {
        let credentials = ProviderCredentials {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            redirect_uri: Some("http://localhost/callback".into()),
        };
        let fp = credentials.secret_fingerprint().unwrap();
        assert_eq!(fp.len(), 8);
        assert_eq!(fp, credentials.secret_fingerprint().unwrap());
    }

    #[test]
    fn test_validate_incomplete_credentials() {
        let credentials = ProviderCredentials::default();
        assert!(!credentials.validate_and_log("spotify"));
    }

    #[test]
    fn test_default_endpoints() {
        assert!(ProviderEndpoints::spotify()
            .authorize_url
            .contains("accounts.spotify.com"));
        assert!(ProviderEndpoints::deezer()
            .token_url
            .contains("connect.deezer.com"));
    }
}
