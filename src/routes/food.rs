// ABOUTME: Food route handlers for the daily log and catalog search
// ABOUTME: Append food entries, list a day's entries, and search the catalog

//! Food routes

use crate::{
    database::NewFoodEntry,
    errors::AppError,
    models::MealType,
    resources::ServerResources,
    routes::authenticate,
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

/// Request to log a food item
#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    /// Food name
    pub food_name: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Calories
    #[serde(default)]
    pub calories: Option<i64>,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs_g: Option<f64>,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: Option<f64>,
    /// Serving quantity as entered
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Optional day selector for food listings
#[derive(Debug, Deserialize, Default)]
struct DayQuery {
    /// Calendar day, `YYYY-MM-DD`; defaults to today in UTC
    date: Option<NaiveDate>,
}

/// Catalog search parameters
#[derive(Debug, Deserialize)]
struct CatalogQuery {
    /// Name fragment to search for
    q: String,
    /// Result bound
    limit: Option<usize>,
}

/// Food routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/food", post(Self::handle_log))
            .route("/api/food", get(Self::handle_list))
            .route("/api/food/catalog/search", get(Self::handle_catalog_search))
            .with_state(resources)
    }

    /// Append a food entry for the caller
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogFoodRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        if request.food_name.trim().is_empty() {
            return Err(AppError::invalid_input("Food name cannot be empty"));
        }

        let entry = resources
            .health_data
            .log_food(
                auth.user_id,
                NewFoodEntry {
                    food_name: request.food_name,
                    meal_type: request.meal_type,
                    calories: request.calories,
                    protein_g: request.protein_g,
                    carbs_g: request.carbs_g,
                    fat_g: request.fat_g,
                    quantity: request.quantity,
                },
            )
            .await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// List the caller's food entries for a day, most recent first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DayQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let date = query.date.unwrap_or_else(HealthDataService::today);

        let entries = resources
            .health_data
            .food_for_day(auth.user_id, date)
            .await?;

        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Search the food catalog
    async fn handle_catalog_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CatalogQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        let limit = query.limit.unwrap_or(20).min(50);
        let foods = resources.catalog.search(&query.q, limit).await?;

        Ok((StatusCode::OK, Json(foods)).into_response())
    }
}
