// ABOUTME: Journal route handlers
// ABOUTME: Append wellbeing entries and list them newest first

//! Journal routes

use crate::{
    database::NewJournalEntry,
    errors::AppError,
    resources::ServerResources,
    routes::{authenticate, clamp_limit},
    services::HealthDataService,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Request to create a journal entry
#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    /// Mood score, 1-10
    #[serde(default)]
    pub mood: Option<i64>,
    /// Energy score, 1-10
    #[serde(default)]
    pub energy_level: Option<i64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Calendar day; defaults to today in UTC
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Optional limit for journal listings
#[derive(Debug, Deserialize, Default)]
struct ListQuery {
    limit: Option<i64>,
}

/// Journal routes
pub struct JournalRoutes;

impl JournalRoutes {
    /// Create all journal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/journal", post(Self::handle_create))
            .route("/api/journal", get(Self::handle_list))
            .with_state(resources)
    }

    /// Append a journal entry for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateJournalRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let entry = resources
            .health_data
            .create_journal_entry(
                auth.user_id,
                NewJournalEntry {
                    mood: request.mood,
                    energy_level: request.energy_level,
                    notes: request.notes,
                    date: request.date.unwrap_or_else(HealthDataService::today),
                },
            )
            .await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// List the caller's journal entries, newest day first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let entries = resources
            .health_data
            .recent_journal_entries(auth.user_id, clamp_limit(query.limit))
            .await?;

        Ok((StatusCode::OK, Json(entries)).into_response())
    }
}
