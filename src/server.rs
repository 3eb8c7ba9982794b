// ABOUTME: Server assembly and lifecycle
// ABOUTME: Builds the router with middleware layers and runs until shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Server assembly
//!
//! Wires the application router with tracing and CORS layers and serves it
//! until ctrl-c.

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router with middleware layers
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    routes::router(resources)
        .layer(TraceLayer::new_for_http())
        // The mobile client runs from app origins, not the API origin
        .layer(CorsLayer::permissive())
}

/// Connect, wire resources, and serve until ctrl-c
///
/// # Errors
///
/// Returns an error if the database connection, socket bind, or server loop
/// fails.
pub async fn run(config: ServerConfig) -> AppResult<()> {
    let config = Arc::new(config);

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    info!(
        "database ready at {}",
        config.database_url.to_connection_string()
    );

    let resources = Arc::new(ServerResources::new(database, config.clone())?);
    let app = build_router(resources);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Stride server listening on {addr} ({})", config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        return;
    }
    info!("shutdown signal received");
}
