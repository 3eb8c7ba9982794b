// ABOUTME: Workout route handlers
// ABOUTME: Append completed workouts and list them most recent first

//! Workout routes

use crate::{
    database::NewWorkout,
    errors::AppError,
    resources::ServerResources,
    routes::{authenticate, clamp_limit},
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request to log a completed workout
#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    /// Workout name
    pub name: String,
    /// Workout type (strength, cardio, hiit, ...)
    pub workout_type: String,
    /// Duration in minutes
    pub duration_minutes: i64,
    /// Calories burned, when tracked
    #[serde(default)]
    pub calories_burned: Option<i64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Optional limit for workout listings
#[derive(Debug, Deserialize, Default)]
struct ListQuery {
    limit: Option<i64>,
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::handle_log))
            .route("/api/workouts", get(Self::handle_list))
            .with_state(resources)
    }

    /// Append a completed workout for the caller
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("Workout name cannot be empty"));
        }
        if request.duration_minutes <= 0 {
            return Err(AppError::new(
                crate::errors::ErrorCode::ValueOutOfRange,
                "Duration must be positive",
            ));
        }

        let session = resources
            .health_data
            .log_workout(
                auth.user_id,
                NewWorkout {
                    name: request.name,
                    workout_type: request.workout_type,
                    duration_minutes: request.duration_minutes,
                    calories_burned: request.calories_burned,
                    notes: request.notes,
                },
            )
            .await?;

        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// List the caller's workouts, most recent first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let workouts = resources
            .health_data
            .recent_workouts(auth.user_id, clamp_limit(query.limit))
            .await?;

        Ok((StatusCode::OK, Json(workouts)).into_response())
    }
}
