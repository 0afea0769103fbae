// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment configuration and OAuth provider credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! Configuration module for the aria-proxy gateway
//!
//! Centralized configuration management, all loaded once at startup:
//!
//! - **Environment**: Server configuration from environment variables
//! - **OAuth**: Per-provider client credentials and endpoint settings

/// Environment and server configuration
pub mod environment;

/// OAuth provider credentials and endpoints
pub mod oauth;
