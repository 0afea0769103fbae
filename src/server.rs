// ABOUTME: Router assembly and HTTP server startup for the proxy
// ABOUTME: Nests per-provider route trees, applies middleware layers, binds the listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! Router assembly and server startup
//!
//! Both providers expose the same surface under their own prefixes. A
//! provider with incomplete credentials fails fast at startup with a typed
//! configuration error rather than producing malformed authorize URLs at
//! request time.

use crate::config::environment::ServerConfig;
use crate::config::oauth::OAuthConfig;
use crate::constants::{deezer, spotify};
use crate::oauth::providers::{DeezerProvider, SpotifyProvider};
use crate::oauth::OAuthProvider;
use crate::routes::{self, health::HealthRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Assemble the full application router
///
/// # Errors
///
/// Returns an error when either provider's credentials are missing or
/// incomplete
pub fn build_router(oauth: &OAuthConfig) -> Result<Router> {
    oauth.spotify.validate_and_log(spotify::PROVIDER);
    oauth.deezer.validate_and_log(deezer::PROVIDER);

    let spotify: Arc<dyn OAuthProvider> = Arc::new(
        SpotifyProvider::new(&oauth.spotify).context("spotify provider configuration")?,
    );
    let deezer: Arc<dyn OAuthProvider> =
        Arc::new(DeezerProvider::new(&oauth.deezer).context("deezer provider configuration")?);

    Ok(Router::new()
        .nest("/spotify", routes::provider_routes(spotify))
        .nest("/deezer", routes::provider_routes(deezer))
        .merge(HealthRoutes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

/// Bind the listener and serve until shutdown
///
/// # Errors
///
/// Returns an error when provider configuration is incomplete, the port
/// cannot be bound, or the server fails while running
pub async fn serve(config: &ServerConfig, oauth: &OAuthConfig) -> Result<()> {
    let app = build_router(oauth)?;

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, "aria-proxy listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
