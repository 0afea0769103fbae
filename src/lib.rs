// ABOUTME: Main library entry point for the aria-proxy music platform gateway
// ABOUTME: Provides OAuth2 authorization-code flows and REST catalog proxying for Spotify and Deezer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

#![deny(unsafe_code)]

//! # Aria Proxy
//!
//! A server-side proxy that performs the OAuth2 Authorization-Code flow against
//! music streaming platforms (Spotify and Deezer) and forwards a fixed set of
//! catalog operations (profile, playlists, tracks, search) to each platform's
//! REST API, relaying responses back to a browser client.
//!
//! ## Architecture
//!
//! - **`oauth`**: The provider-generic handshake core: state nonce generation,
//!   the callback state machine, and the [`oauth::OAuthProvider`] trait with
//!   one variant implementation per platform
//! - **`catalog`**: Pass-through resource proxying; providers build upstream
//!   requests, a shared executor relays the JSON body verbatim
//! - **`routes`**: Browser-facing HTTP surface, mounted per provider under
//!   `/spotify` and `/deezer`
//! - **`config`**: Typed environment configuration, constructed once at startup
//!
//! The proxy is stateless across requests: tokens are owned by the browser once
//! issued, and the only request-scoped state is the short-lived CSRF cookie.

/// Pass-through catalog requests and the shared upstream executor
pub mod catalog;

/// Environment and OAuth provider configuration
pub mod config;

/// System-wide constants and environment-based defaults
pub mod constants;

/// Unified error handling and HTTP error responses
pub mod errors;

/// Shared `HTTP` client with connection pooling for upstream calls
pub mod http_client;

/// Structured logging configuration
pub mod logging;

/// OAuth2 authorization-code handshake core and provider implementations
pub mod oauth;

/// `HTTP` routes for authentication flows and catalog proxying
pub mod routes;

/// Router assembly and server startup
pub mod server;
