// ABOUTME: Status Window HTTP server binary
// ABOUTME: Loads environment configuration, prepares the record store, and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Status Window Contributors

//! # Status Window Server Binary
//!
//! Starts the dashboard API with the admin record store.

use anyhow::{Context, Result};
use clap::Parser;
use status_window::config::environment::{DatabaseUrl, ServerConfig};
use status_window::logging;
use status_window::resources::ServerResources;
use status_window::server;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "status-window-server")]
#[command(about = "Status Window - gamified personal stats dashboard API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database =
            DatabaseUrl::parse_url(&database_url).context("Invalid --database-url value")?;
    }

    logging::init_from_env()?;

    info!("Starting Status Window server");
    info!("{}", config.summary());
    if config.database.is_memory() {
        warn!("Using an in-memory database; records are lost on shutdown");
    }

    let resources = ServerResources::initialize(config).await?;
    info!("Server resources initialized");

    if let Err(e) = server::run(Arc::new(resources)).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
