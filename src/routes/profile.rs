// ABOUTME: Profile route handlers for onboarding data
// ABOUTME: Get, create, and partially update the per-user profile

//! Profile routes

use crate::{
    errors::AppError,
    models::UserProfilePatch,
    resources::ServerResources,
    routes::authenticate,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::handle_get))
            .route("/api/profile", post(Self::handle_create))
            .route("/api/profile", patch(Self::handle_update))
            .with_state(resources)
    }

    /// Get the caller's profile; 404 until onboarding creates it
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let profile = resources
            .health_data
            .profile(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("profile"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Create the caller's profile from onboarding data
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(patch): Json<UserProfilePatch>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let profile = resources
            .health_data
            .create_profile(auth.user_id, patch)
            .await?;

        Ok((StatusCode::CREATED, Json(profile)).into_response())
    }

    /// Apply a partial update to the caller's profile
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(patch): Json<UserProfilePatch>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let profile = resources
            .health_data
            .update_profile(auth.user_id, patch)
            .await?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
