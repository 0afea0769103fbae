// ABOUTME: HTTP route modules for the browser-facing surface of the proxy
// ABOUTME: Auth flow routes, catalog proxy routes, and health endpoints, mounted per provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! HTTP routes exposed to the browser
//!
//! Each provider gets the same surface, mounted under its own path prefix
//! (`/spotify`, `/deezer`): the OAuth flow endpoints plus the catalog proxy
//! endpoints. Handlers are generic over [`OAuthProvider`](crate::oauth::OAuthProvider);
//! nothing in this module is platform-specific.

/// OAuth flow routes: login, logout, callback, refresh
pub mod auth;

/// Catalog proxy routes: profile, playlists, tracks, search
pub mod catalog;

/// Health check routes
pub mod health;

use crate::oauth::OAuthProvider;
use axum::Router;
use std::sync::Arc;

/// All routes for one provider, ready to nest under its path prefix
#[must_use]
pub fn provider_routes(provider: Arc<dyn OAuthProvider>) -> Router {
    auth::AuthRoutes::routes(provider.clone()).merge(catalog::CatalogRoutes::routes(provider))
}
