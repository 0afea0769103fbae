// ABOUTME: System-wide constants and configuration values for the aria-proxy gateway
// ABOUTME: Contains ports, OAuth defaults, pagination defaults, and upstream platform endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Constants Module
//!
//! Application constants and environment variable configuration.
//! Upstream platform endpoints live here so provider implementations and
//! tests share a single source of truth.

/// Network port constants
pub mod ports {
    /// Default HTTP port the proxy listens on
    pub const DEFAULT_HTTP_PORT: u16 = 8888;
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    /// Get HTTP port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .unwrap_or_else(|_| super::ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .unwrap_or(super::ports::DEFAULT_HTTP_PORT)
    }
}

/// OAuth handshake constants
pub mod oauth {
    /// Length of the anti-CSRF state nonce
    pub const STATE_LENGTH: usize = 16;

    /// Lifetime of the state cookie binding an authorization attempt
    pub const STATE_COOKIE_MAX_AGE_SECS: i64 = 24 * 60 * 60;

    /// Request timeout for upstream provider calls
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 30;

    /// Connection timeout for upstream provider calls
    pub const UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Pagination defaults applied when the caller omits them
pub mod pagination {
    /// Default page offset
    pub const DEFAULT_OFFSET: u32 = 0;

    /// Default page size
    pub const DEFAULT_LIMIT: u32 = 20;
}

/// Spotify platform endpoints and authorization scopes
pub mod spotify {
    /// Provider name used in logs and error messages
    pub const PROVIDER: &str = "spotify";

    /// Accounts service authorize endpoint
    pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

    /// Accounts service token endpoint
    pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

    /// Web API base
    pub const API_BASE: &str = "https://api.spotify.com";

    /// Cookie binding an authorization attempt to its callback
    pub const STATE_COOKIE: &str = "spotify_auth_state";

    /// Requested permission scopes, space-joined in the authorize URL
    pub const SCOPES: &[&str] = &[
        "ugc-image-upload",
        "user-read-playback-state",
        "user-modify-playback-state",
        "user-read-currently-playing",
        "streaming",
        "app-remote-control",
        "user-read-email",
        "user-read-private",
        "playlist-read-collaborative",
        "playlist-modify-public",
        "playlist-read-private",
        "playlist-modify-private",
        "user-library-modify",
        "user-library-read",
        "user-top-read",
        "user-read-playback-position",
        "user-read-recently-played",
        "user-follow-read",
        "user-follow-modify",
    ];
}

/// Deezer platform endpoints and permissions
pub mod deezer {
    /// Provider name used in logs and error messages
    pub const PROVIDER: &str = "deezer";

    /// Connect service authorize endpoint
    pub const AUTHORIZE_URL: &str = "https://connect.deezer.com/oauth/auth.php";

    /// Connect service token endpoint
    pub const TOKEN_URL: &str = "https://connect.deezer.com/oauth/access_token.php";

    /// API base
    pub const API_BASE: &str = "https://api.deezer.com";

    /// Cookie binding an authorization attempt to its callback
    pub const STATE_COOKIE: &str = "deezer_auth_state";

    /// Requested permissions, comma-joined in the authorize URL
    pub const PERMISSIONS: &[&str] = &[
        "basic_access",
        "manage_library",
        "delete_library",
        "listening_history",
        "offline_access",
    ];
}

/// Service identity for structured logging
pub mod service_names {
    /// Canonical service name
    pub const ARIA_PROXY: &str = "aria-proxy";
}
