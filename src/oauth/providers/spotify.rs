// ABOUTME: Spotify OAuth provider and catalog request construction
// ABOUTME: Basic-auth token exchange against the Accounts service, bearer-token Web API calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

use crate::catalog::CatalogRequest;
use crate::config::oauth::{ProviderCredentials, ProviderEndpoints};
use crate::constants::spotify;
use crate::http_client;
use crate::oauth::{OAuthError, OAuthProvider, TokenPair};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use url::Url;

/// Spotify OAuth provider
///
/// Authorization against the Accounts service; catalog calls against the Web
/// API with the access token in a bearer `Authorization` header. Credentials
/// on the token endpoint travel as an HTTP Basic header, per Spotify's
/// documented contract.
pub struct SpotifyProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    endpoints: ProviderEndpoints,
    http: reqwest::Client,
}

/// Spotify token response format
#[derive(Debug, Deserialize)]
struct SpotifyTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl SpotifyProvider {
    /// Create a provider against the production Spotify endpoints
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any credential is missing or empty
    pub fn new(credentials: &ProviderCredentials) -> Result<Self, OAuthError> {
        Self::with_endpoints(credentials, ProviderEndpoints::spotify())
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
            client_id: require(&credentials.client_id, "spotify client_id")?,
            client_secret: require(&credentials.client_secret, "spotify client_secret")?,
            redirect_uri: require(&credentials.redirect_uri, "spotify redirect_uri")?,
            endpoints,
            http: http_client::shared_client().clone(),
        })
    }

    fn basic_credentials(&self) -> String {
        general_purpose::STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }

    async fn token_request(
        &self,
        params: &[(&str, &str)],
    ) -> Result<(reqwest::StatusCode, Option<SpotifyTokenResponse>), OAuthError> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.basic_credentials()),
            )
            .form(params)
            .send()
            .await
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, None));
        }

        let body: SpotifyTokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidResponse(e.to_string()))?;
        Ok((status, Some(body)))
    }
}

#[async_trait::async_trait]
impl OAuthProvider for SpotifyProvider {
    fn name(&self) -> &'static str {
        spotify::PROVIDER
    }

    fn state_cookie(&self) -> &'static str {
        spotify::STATE_COOKIE
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let mut url = Url::parse(&self.endpoints.authorize_url)
            .map_err(|e| OAuthError::ConfigurationError(format!("invalid authorize URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", &spotify::SCOPES.join(" "))
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state);

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenPair, OAuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        match self.token_request(&params).await? {
            (_, Some(body)) => Ok(TokenPair {
                access_token: body.access_token,
                refresh_token: body.refresh_token,
                expires_in: body.expires_in,
            }),
            (status, None) => Err(OAuthError::TokenExchangeFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_owned(),
            }),
        }
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        match self.token_request(&params).await? {
            (_, Some(body)) => Ok(TokenPair {
                access_token: body.access_token,
                // Spotify typically does not reissue the refresh token
                refresh_token: body.refresh_token,
                expires_in: body.expires_in,
            }),
            (status, None) => Err(OAuthError::TokenRefreshFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_owned(),
            }),
        }
    }

    fn resource_request(
        &self,
        access_token: &str,
        request: &CatalogRequest,
    ) -> reqwest::RequestBuilder {
        let base = &self.endpoints.api_base;
        let builder = match request {
            CatalogRequest::Profile => self.http.get(format!("{base}/v1/me")),
            CatalogRequest::Playlists { offset, limit } => self
                .http
                .get(format!("{base}/v1/me/playlists"))
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::Playlist {
                playlist_id,
                offset,
                limit,
            } => self
                .http
                .get(format!(
                    "{base}/v1/playlists/{}",
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
                    "{base}/v1/playlists/{}/tracks",
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
                    "{base}/v1/users/{}/playlists",
                    urlencoding::encode(user_id)
                ))
                .json(&serde_json::json!({
                    "name": name,
                    "public": is_public,
                    "collaborative": is_collaborative,
                    "description": description,
                })),
            CatalogRequest::AddPlaylistItems { playlist_id, items } => self
                .http
                .post(format!(
                    "{base}/v1/playlists/{}/tracks",
                    urlencoding::encode(playlist_id)
                ))
                .json(&serde_json::json!({ "uris": items })),
            CatalogRequest::Search {
                query,
                kind,
                offset,
                limit,
            } => self
                .http
                .get(format!("{base}/v1/search"))
                .query(&[("q", query.as_str()), ("type", kind.as_str())])
                .query(&[("offset", offset), ("limit", limit)]),
            CatalogRequest::Track { track_id } => self.http.get(format!(
                "{base}/v1/tracks/{}",
                urlencoding::encode(track_id)
            )),
        };

        builder.bearer_auth(access_token)
    }
}

fn require(value: &Option<String>, name: &str) -> Result<String, OAuthError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| OAuthError::ConfigurationError(format!("{name} not configured")))
}
