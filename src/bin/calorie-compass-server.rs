// ABOUTME: Server binary for the CalorieCompass nutrition tracking API
// ABOUTME: Loads configuration, opens the user database, and serves HTTP until shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # CalorieCompass Server Binary
//!
//! Starts the JSON API and HTML pages backed by SQLite user storage and the
//! FatSecret Platform API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use calorie_compass::{
    config::ServerConfig, database::Database, logging::LoggingConfig,
    resources::ServerResources, server,
};
use calorie_providers::FatSecretClient;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "calorie-compass-server")]
#[command(about = "CalorieCompass - calorie tracking API with FatSecret food search")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }

    LoggingConfig::from_env(&config.logger.log_level.to_string()).init()?;

    info!("Starting CalorieCompass server");
    info!("{}", config.summary());

    let database_url = config.database_url()?;
    let database = Database::new(&database_url, config.database.pool_max)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    let food_source = FatSecretClient::new(config.fatsecret_config())
        .context("Failed to create FatSecret client")?;

    let resources = Arc::new(ServerResources::new(
        database,
        Arc::new(food_source),
        Arc::new(config),
    ));

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
