// ABOUTME: REST API surface consumed by the mobile client
// ABOUTME: One router per concern, merged into the full application router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # HTTP Routes
//!
//! Thin handlers: authenticate the bearer token, parse the request, delegate
//! to a service, map the result to a status code. All per-user routes require
//! a valid session token.

/// Authentication and session endpoints
pub mod auth;
/// Coach conversation endpoints
pub mod coach;
/// Progress dashboard endpoint
pub mod dashboard;
/// Session change notification stream
pub mod events;
/// Food log and catalog endpoints
pub mod food;
/// Liveness endpoint
pub mod health;
/// Journal endpoints
pub mod journal;
/// Profile endpoints
pub mod profile;
/// Daily stats endpoints
pub mod stats;
/// Workout endpoints
pub mod workouts;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes(resources.clone()))
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(events::EventRoutes::routes(resources.clone()))
        .merge(profile::ProfileRoutes::routes(resources.clone()))
        .merge(stats::StatsRoutes::routes(resources.clone()))
        .merge(workouts::WorkoutRoutes::routes(resources.clone()))
        .merge(food::FoodRoutes::routes(resources.clone()))
        .merge(journal::JournalRoutes::routes(resources.clone()))
        .merge(coach::CoachRoutes::routes(resources.clone()))
        .merge(dashboard::DashboardRoutes::routes(resources))
}

/// Extract and authenticate the user from the authorization header
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    resources
        .auth_middleware
        .authenticate_request(auth_header)
        .await
}

/// Clamp a requested list limit into the accepted range
pub(crate) fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(crate::constants::limits::DEFAULT_LIST_LIMIT)
        .clamp(1, crate::constants::limits::MAX_LIST_LIMIT)
}
