// ABOUTME: Catalog proxy route handlers forwarding typed request bodies upstream
// ABOUTME: Validates required fields, applies pagination defaults, relays upstream JSON verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! Catalog proxy routes
//!
//! One POST endpoint per upstream operation. Every body carries the caller's
//! `access_token`; endpoint-specific parameters are typed and validated
//! before anything goes upstream, so undefined values never reach the
//! provider. Responses are the upstream JSON body verbatim; upstream errors
//! mirror the upstream status.
//!
//! ## Endpoints
//!
//! - `POST /me` - current user's profile
//! - `POST /playlists` - page of the user's playlists
//! - `POST /playlist` - one playlist's detail
//! - `POST /playlist/tracks` - page of a playlist's tracks
//! - `POST /add/playlist` - create a playlist
//! - `POST /add/playlist/items` - append items to a playlist
//! - `POST /search` - catalog search
//! - `POST /track` - one track's detail

use crate::catalog::{self, CatalogRequest};
use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::errors::AppError;
use crate::oauth::OAuthProvider;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Catalog proxy routes for one provider
pub struct CatalogRoutes;

/// Body carrying only the access token
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub access_token: String,
}

/// Body for the current user's playlist page
#[derive(Debug, Deserialize)]
pub struct PlaylistsRequest {
    pub access_token: String,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Body for one playlist's detail or track page
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub access_token: String,
    pub playlist_id: String,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Body for playlist creation
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub access_token: String,
    pub user_id: String,
    pub name: String,
    pub is_public: Option<bool>,
    pub is_collaborative: Option<bool>,
    pub description: Option<String>,
}

/// Body for appending items to a playlist; `uris` (Spotify track URIs) and
/// `songs` (Deezer track ids) are interchangeable
#[derive(Debug, Deserialize)]
pub struct AddPlaylistItemsRequest {
    pub access_token: String,
    pub playlist_id: String,
    pub uris: Option<Vec<String>>,
    pub songs: Option<Vec<String>>,
}

/// Body for catalog search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub access_token: String,
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Body for one track's detail
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub access_token: String,
    pub track_id: String,
}

impl CatalogRoutes {
    /// Create the catalog proxy routes
    pub fn routes(provider: Arc<dyn OAuthProvider>) -> Router {
        Router::new()
            .route("/me", post(Self::handle_profile))
            .route("/playlists", post(Self::handle_playlists))
            .route("/playlist", post(Self::handle_playlist))
            .route("/playlist/tracks", post(Self::handle_playlist_tracks))
            .route("/add/playlist", post(Self::handle_create_playlist))
            .route("/add/playlist/items", post(Self::handle_add_playlist_items))
            .route("/search", post(Self::handle_search))
            .route("/track", post(Self::handle_track))
            .with_state(provider)
    }

    async fn handle_profile(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<ProfileRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;

        let body =
            catalog::proxy(provider.as_ref(), &request.access_token, CatalogRequest::Profile)
                .await?;
        Ok(Json(body).into_response())
    }

    async fn handle_playlists(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<PlaylistsRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;

        let upstream = CatalogRequest::Playlists {
            offset: request.offset.unwrap_or(DEFAULT_OFFSET),
            limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_playlist(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<PlaylistRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.playlist_id, "playlist_id")?;

        let upstream = CatalogRequest::Playlist {
            playlist_id: request.playlist_id,
            offset: request.offset.unwrap_or(DEFAULT_OFFSET),
            limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_playlist_tracks(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<PlaylistRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.playlist_id, "playlist_id")?;

        let upstream = CatalogRequest::PlaylistTracks {
            playlist_id: request.playlist_id,
            offset: request.offset.unwrap_or(DEFAULT_OFFSET),
            limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_create_playlist(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<CreatePlaylistRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.user_id, "user_id")?;
        require(&request.name, "name")?;

        let upstream = CatalogRequest::CreatePlaylist {
            user_id: request.user_id,
            name: request.name,
            is_public: request.is_public.unwrap_or(true),
            is_collaborative: request.is_collaborative.unwrap_or(false),
            description: request.description.unwrap_or_default(),
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_add_playlist_items(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<AddPlaylistItemsRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.playlist_id, "playlist_id")?;

        let items = request
            .uris
            .or(request.songs)
            .filter(|items| !items.is_empty())
            .ok_or_else(|| AppError::missing_field("uris or songs"))?;

        let upstream = CatalogRequest::AddPlaylistItems {
            playlist_id: request.playlist_id,
            items,
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_search(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<SearchRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.query, "query")?;
        require(&request.kind, "type")?;

        let upstream = CatalogRequest::Search {
            query: request.query,
            kind: request.kind,
            offset: request.offset.unwrap_or(DEFAULT_OFFSET),
            limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }

    async fn handle_track(
        State(provider): State<Arc<dyn OAuthProvider>>,
        Json(request): Json<TrackRequest>,
    ) -> Result<Response, AppError> {
        require(&request.access_token, "access_token")?;
        require(&request.track_id, "track_id")?;

        let upstream = CatalogRequest::Track {
            track_id: request.track_id,
        };
        let body = catalog::proxy(provider.as_ref(), &request.access_token, upstream).await?;
        Ok(Json(body).into_response())
    }
}

/// Reject empty required fields before anything goes upstream
fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::missing_field(field))
    } else {
        Ok(())
    }
}
