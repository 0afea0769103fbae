// ABOUTME: Shared HTTP client with connection pooling for upstream platform calls
// ABOUTME: Singleton pattern with explicit timeouts so a hanging upstream cannot block forever
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

use crate::constants::oauth::{UPSTREAM_CONNECT_TIMEOUT_SECS, UPSTREAM_TIMEOUT_SECS};
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Global shared HTTP client for all upstream provider calls
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get the shared HTTP client for provider API calls
///
/// This client uses connection pooling and explicit timeouts. Every outbound
/// call inherits the timeout, so a stalled provider surfaces as a transport
/// error instead of blocking the request indefinitely.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(UPSTREAM_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
