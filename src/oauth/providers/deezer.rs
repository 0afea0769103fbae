// ABOUTME: Deezer OAuth provider and catalog request construction
// ABOUTME: Plaintext-credential token exchange, access token as a query parameter on API calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

use crate::catalog::CatalogRequest;
use crate::config::oauth::{ProviderCredentials, ProviderEndpoints};
use crate::constants::deezer;
use crate::http_client;
use crate::oauth::{OAuthError, OAuthProvider, TokenPair};
use serde::Deserialize;
use url::Url;

/// Deezer OAuth provider
///
/// Deezer's Connect service takes `app_id`/`secret` as plaintext form fields
/// on the token endpoint, and its API expects the access token as an
/// `access_token` query parameter rather than a bearer header. Tokens issued
/// with `offline_access` do not expire and Deezer exposes no refresh grant.
pub struct DeezerProvider {
    app_id: String,
    secret: String,
    redirect_uri: String,
    endpoints: ProviderEndpoints,
    http: reqwest::Client,
}

/// Deezer token response format; note `expires`, not `expires_in`, and no
/// refresh token
#[derive(Debug, Deserialize)]
struct DeezerTokenResponse {
    access_token: String,
    #[serde(default)]
    expires: Option<u64>,
}

impl DeezerProvider {
    /// Create a provider against the production Deezer endpoints
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any credential is missing or empty
    pub fn new(credentials: &ProviderCredentials) -> Result<Self, OAuthError> {
        Self::with_endpoints(credentials, ProviderEndpoints::deezer())
    }

    /// Create a provider against explicit endpoints
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any credential is missing or empty
    pub fn with_endpoints(
        credentials: &ProviderCredentials,
        endpoints: ProviderEndpoints,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            app_id: require(&credentials.client_id, "deezer app_id")?,
            secret: require(&credentials.client_secret, "deezer secret")?,
            redirect_uri: require(&credentials.redirect_uri, "deezer redirect_uri")?,
            endpoints,
            http: http_client::shared_client().clone(),
        })
    }
}

#[async_trait::async_trait]
impl OAuthProvider for DeezerProvider {
    fn name(&self) -> &'static str {
        deezer::PROVIDER
    }

    fn state_cookie(&self) -> &'static str {
        deezer::STATE_COOKIE
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let mut url = Url::parse(&self.endpoints.authorize_url)
            .map_err(|e| OAuthError::ConfigurationError(format!("invalid authorize URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("app_id", &self.app_id)
            .append_pair("perms", &deezer::PERMISSIONS.join(","))
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state);

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenPair, OAuthError> {
        // Credentials travel as plaintext form fields; POST keeps them out of
        // the URL even though Deezer also accepts GET here
        let params = [
            ("app_id", self.app_id.as_str()),
            ("secret", self.secret.as_str()),
            ("code", code),
            ("output", "json"),
        ];

        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::TokenExchangeFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_owned(),
            });
        }

        let body: DeezerTokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidResponse(e.to_string()))?;

        Ok(TokenPair {
            access_token: body.access_token,
            refresh_token: None,
            expires_in: body.expires,
        })
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<TokenPair, OAuthError> {
        Err(OAuthError::RefreshNotSupported(deezer::PROVIDER))
    }

    fn resource_request(
        &self,
        access_token: &str,
        request: &CatalogRequest,
    ) -> reqwest::RequestBuilder {
        let base = &self.endpoints.api_base;
        let builder = match request {
            CatalogRequest::Profile => self.http.get(format!("{base}/user/me")),
            CatalogRequest::Playlists { offset, limit } => self
                .http
                .get(format!("{base}/user/me/playlists"))
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::Playlist {
                playlist_id,
                offset,
                limit,
            } => self
                .http
                .get(format!(
                    "{base}/playlist/{}",
                    urlencoding::encode(playlist_id)
                ))
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::PlaylistTracks {
                playlist_id,
                offset,
                limit,
            } => self
                .http
                .get(format!(
                    "{base}/playlist/{}/tracks",
                    urlencoding::encode(playlist_id)
                ))
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::CreatePlaylist {
                user_id,
                name,
                is_public,
                is_collaborative,
                description,
            } => self
                .http
                .post(format!(
                    "{base}/user/{}/playlists",
                    urlencoding::encode(user_id)
                ))
                .query(&[("title", name.as_str()), ("description", description.as_str())])
                .query(&[("public", is_public), ("collaborative", is_collaborative)]),
            CatalogRequest::AddPlaylistItems { playlist_id, items } => self
                .http
                .post(format!(
                    "{base}/playlist/{}/tracks",
                    urlencoding::encode(playlist_id)
                ))
                .query(&[("songs", items.join(","))]),
            CatalogRequest::Search {
                query,
                kind,
                offset,
                limit,
            } => self
                .http
                .get(format!("{base}/search/{}", urlencoding::encode(kind)))
                .query(&[("q", query.as_str())])
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::Track { track_id } => self
                .http
                .get(format!("{base}/track/{}", urlencoding::encode(track_id))),
        };

        builder.query(&[("access_token", access_token)])
    }
}

fn require(value: &Option<String>, name: &str) -> Result<String, OAuthError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| OAuthError::ConfigurationError(format!("{name} not configured")))
}
