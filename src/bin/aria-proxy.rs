// ABOUTME: Server binary for the aria-proxy music platform gateway
// ABOUTME: Loads configuration, initializes logging, and serves the OAuth and catalog routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 aria-proxy contributors

//! # Aria Proxy Server Binary
//!
//! Starts the OAuth2 authorization-code proxy for Spotify and Deezer.

use anyhow::Result;
use aria_proxy::{
    config::{environment::ServerConfig, oauth::OAuthConfig},
    logging, server,
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "aria-proxy")]
#[command(about = "OAuth2 authorization-code proxy for music streaming platform APIs")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting aria-proxy");
    info!("{}", config.summary());

    let oauth = OAuthConfig::from_env();

    server::serve(&config, &oauth).await
}
