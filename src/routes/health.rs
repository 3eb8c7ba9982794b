// ABOUTME: Liveness route handler
// ABOUTME: Answers with service identity and a database ping

//! Health check routes

use crate::{errors::AppError, resources::ServerResources};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status, `ok` when every probe passes
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
}

/// Health routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Liveness probe: answers `ok` only when the database responds
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        resources.database.ping().await?;

        let response = HealthResponse {
            status: "ok".into(),
            service: crate::constants::service::NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
