// ABOUTME: Pass-through catalog operations proxied to upstream platform REST APIs
// ABOUTME: Providers build the upstream request; a shared executor relays the JSON body verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Catalog Proxy
//!
//! The resource-proxy half of the gateway. [`CatalogRequest`] enumerates every
//! upstream operation; each [`OAuthProvider`](crate::oauth::OAuthProvider)
//! maps a request to its platform's method, path, query parameters, and body.
//! [`proxy`] executes the single upstream call and relays the response body
//! unchanged on success, or surfaces the upstream status verbatim on failure.
//! Upstream JSON shapes are opaque; nothing is validated or reshaped here.

use crate::errors::AppError;
use crate::oauth::OAuthProvider;
use serde_json::Value;
use tracing::{debug, warn};

/// One upstream catalog operation, provider-independent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Current user's profile
    Profile,
    /// Page of the current user's playlists
    Playlists { offset: u32, limit: u32 },
    /// Detail of one playlist
    Playlist {
        playlist_id: String,
        offset: u32,
        limit: u32,
    },
    /// Page of tracks in one playlist
    PlaylistTracks {
        playlist_id: String,
        offset: u32,
        limit: u32,
    },
    /// Create a playlist owned by `user_id`
    CreatePlaylist {
        user_id: String,
        name: String,
        is_public: bool,
        is_collaborative: bool,
        description: String,
    },
    /// Append items (track URIs or ids) to a playlist
    AddPlaylistItems {
        playlist_id: String,
        items: Vec<String>,
    },
    /// Free-text catalog search of one result kind
    Search {
        query: String,
        kind: String,
        offset: u32,
        limit: u32,
    },
    /// Detail of one track
    Track { track_id: String },
}

impl CatalogRequest {
    /// Operation name for logging
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            CatalogRequest::Profile => "profile",
            CatalogRequest::Playlists { .. } => "playlists",
            CatalogRequest::Playlist { .. } => "playlist",
            CatalogRequest::PlaylistTracks { .. } => "playlist_tracks",
            CatalogRequest::CreatePlaylist { .. } => "create_playlist",
            CatalogRequest::AddPlaylistItems { .. } => "add_playlist_items",
            CatalogRequest::Search { .. } => "search",
            CatalogRequest::Track { .. } => "track",
        }
    }
}

/// Execute one catalog operation against the provider and relay the result
///
/// Exactly one upstream call, awaited before responding. A 2xx upstream
/// status relays the JSON body verbatim; any other status becomes an error
/// carrying the upstream status code and status text, mirrored to the caller.
/// Nothing is retried.
///
/// # Errors
///
/// Returns an error on transport failure, a non-success upstream status, or
/// a response body that is not JSON
pub async fn proxy(
    provider: &dyn OAuthProvider,
    access_token: &str,
    request: CatalogRequest,
) -> Result<Value, AppError> {
    let operation = request.operation();
    debug!(provider = provider.name(), operation, "proxying catalog request");

    let response = provider
        .resource_request(access_token, &request)
        .send()
        .await
        .map_err(|e| AppError::upstream_unreachable(provider.name(), e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::upstream_unreachable(provider.name(), e.to_string()))
    } else {
        let status_text = status.canonical_reason().unwrap_or("unknown");
        warn!(
            provider = provider.name(),
            operation,
            status = status.as_u16(),
            "upstream returned non-success status"
        );
        Err(AppError::upstream(
            provider.name(),
            status.as_u16(),
            status_text,
        ))
    }
}
