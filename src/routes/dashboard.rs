// ABOUTME: Dashboard route handler for the progress screen
// ABOUTME: Thin wrapper over the dashboard aggregation service

//! Dashboard routes

use crate::{
    errors::AppError,
    resources::ServerResources,
    routes::{authenticate, clamp_limit},
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Optional bound on recent workouts included in the overview
#[derive(Debug, Deserialize, Default)]
struct OverviewQuery {
    limit: Option<i64>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::handle_overview))
            .with_state(resources)
    }

    /// Build the caller's progress overview
    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<OverviewQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let overview = resources
            .dashboard
            .overview(auth.user_id, clamp_limit(query.limit))
            .await?;

        Ok((StatusCode::OK, Json(overview)).into_response())
    }
}
