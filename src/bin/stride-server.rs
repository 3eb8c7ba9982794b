// ABOUTME: Stride server binary entrypoint
// ABOUTME: Parses CLI overrides, loads environment config, and serves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Stride Health API server binary

use clap::Parser;
use stride_server::config::ServerConfig;
use stride_server::logging::LoggingConfig;
use stride_server::server;

/// Stride Health API - fitness and wellness tracking backend
#[derive(Parser)]
#[command(name = "stride-server", version, about)]
struct Args {
    /// Override the HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database_url = stride_server::config::DatabaseUrl::parse_url(&url);
    }

    server::run(config).await?;
    Ok(())
}
