// ABOUTME: Daily stats route handlers
// ABOUTME: Read and upsert the per-day counters, defaulting to today in UTC

//! Daily stats routes
//!
//! `GET /api/stats/today` answers with an all-zero baseline rather than a
//! 404 before the first write: a missing row and a zeroed day are the same
//! thing to the client.

use crate::{
    errors::AppError,
    models::{DailyStats, DailyStatsPatch},
    resources::ServerResources,
    routes::authenticate,
    services::HealthDataService,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Optional day selector for stats reads
#[derive(Debug, Deserialize, Default)]
struct DayQuery {
    /// Calendar day, `YYYY-MM-DD`; defaults to today in UTC
    date: Option<NaiveDate>,
}

/// Daily stats routes
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create all stats routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/stats/today", get(Self::handle_get))
            .route("/api/stats/today", patch(Self::handle_upsert))
            .with_state(resources)
    }

    /// Get the caller's counters for the selected day
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DayQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let date = query.date.unwrap_or_else(HealthDataService::today);

        let stats = resources
            .health_data
            .stats_for(auth.user_id, date)
            .await?
            .unwrap_or_else(|| empty_stats(auth.user_id, date));

        Ok((StatusCode::OK, Json(stats)).into_response())
    }

    /// Merge a partial update into the caller's counters for the day
    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DayQuery>,
        Json(patch): Json<DailyStatsPatch>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        if patch.is_empty() {
            return Err(AppError::invalid_input("No stats fields provided"));
        }
        for value in [
            patch.steps,
            patch.calories_burned,
            patch.water_glasses,
            patch.workouts_completed,
        ]
        .into_iter()
        .flatten()
        {
            if value < 0 {
                return Err(AppError::new(
                    crate::errors::ErrorCode::ValueOutOfRange,
                    "Counters cannot be negative",
                ));
            }
        }

        let date = query.date.unwrap_or_else(HealthDataService::today);
        let stats = resources
            .health_data
            .upsert_stats(auth.user_id, date, &patch)
            .await?;

        Ok((StatusCode::OK, Json(stats)).into_response())
    }
}

/// All-zero baseline returned before any write for the day
fn empty_stats(user_id: Uuid, date: NaiveDate) -> DailyStats {
    let now = Utc::now();
    DailyStats {
        user_id,
        date,
        steps: 0,
        calories_burned: 0,
        water_glasses: 0,
        workouts_completed: 0,
        weight_kg: None,
        created_at: now,
        updated_at: now,
    }
}
