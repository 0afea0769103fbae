// ABOUTME: Concrete OAuth provider implementations for music platforms
// ABOUTME: Spotify uses Basic-auth form exchange, Deezer plaintext credential fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Provider Implementations
//!
//! One module per platform. Both implement [`OAuthProvider`](super::OAuthProvider)
//! and differ only where the platforms' documented contracts differ: credential
//! encoding on the token endpoint, scope delimiters on the authorize URL, and
//! where the access token travels on catalog calls.

mod deezer;
mod spotify;

pub use deezer::DeezerProvider;
pub use spotify::SpotifyProvider;
