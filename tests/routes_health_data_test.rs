// ABOUTME: Integration tests for stats, workout, food, journal, and catalog routes
// ABOUTME: Exercises the REST surface end to end over in-memory resources

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::{get, patch, post, setup_authenticated};
use serde_json::json;
use stride_server::catalog::CatalogFood;
use stride_server::models::{DailyStats, FoodEntry, WorkoutSession};
use stride_server::routes;

#[tokio::test]
async fn test_stats_read_returns_zero_baseline_before_any_write() {
    let (resources, user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = get(router, "/api/stats/today", Some(&auth)).await;
    assert_eq!(response.status, StatusCode::OK);

    let stats: DailyStats = response.json();
    assert_eq!(stats.user_id, user_id);
    assert_eq!(stats.steps, 0);
    assert_eq!(stats.water_glasses, 0);
    assert!(stats.weight_kg.is_none());
}

#[tokio::test]
async fn test_stats_upsert_merges_partial_updates() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let first = patch(
        router.clone(),
        "/api/stats/today",
        Some(&auth),
        json!({"steps": 5000}),
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = patch(
        router.clone(),
        "/api/stats/today",
        Some(&auth),
        json!({"water_glasses": 4}),
    )
    .await;
    let merged: DailyStats = second.json();
    assert_eq!(merged.steps, 5000);
    assert_eq!(merged.water_glasses, 4);

    // The cached read reflects the merge immediately
    let read = get(router, "/api/stats/today", Some(&auth)).await;
    let stats: DailyStats = read.json();
    assert_eq!(stats.steps, 5000);
    assert_eq!(stats.water_glasses, 4);
}

#[tokio::test]
async fn test_stats_upsert_rejects_bad_input() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let empty = patch(router.clone(), "/api/stats/today", Some(&auth), json!({})).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let negative = patch(
        router,
        "/api/stats/today",
        Some(&auth),
        json!({"steps": -10}),
    )
    .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.body["error"]["code"], "VALUE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_workout_log_and_list_through_the_cache() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    // Prime the cached (empty) list first
    let empty = get(router.clone(), "/api/workouts", Some(&auth)).await;
    assert_eq!(empty.json::<Vec<WorkoutSession>>().len(), 0);

    let logged = post(
        router.clone(),
        "/api/workouts",
        Some(&auth),
        json!({
            "name": "Push Day",
            "workout_type": "strength",
            "duration_minutes": 45,
            "calories_burned": 300
        }),
    )
    .await;
    assert_eq!(logged.status, StatusCode::CREATED);

    // Logging invalidated the cached list
    let listed = get(router, "/api/workouts", Some(&auth)).await;
    let workouts: Vec<WorkoutSession> = listed.json();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].name, "Push Day");
}

#[tokio::test]
async fn test_workout_validation() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let unnamed = post(
        router.clone(),
        "/api/workouts",
        Some(&auth),
        json!({"name": "  ", "workout_type": "cardio", "duration_minutes": 30}),
    )
    .await;
    assert_eq!(unnamed.status, StatusCode::BAD_REQUEST);

    let zero_minutes = post(
        router,
        "/api/workouts",
        Some(&auth),
        json!({"name": "Run", "workout_type": "cardio", "duration_minutes": 0}),
    )
    .await;
    assert_eq!(zero_minutes.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_food_log_and_day_listing() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let logged = post(
        router.clone(),
        "/api/food",
        Some(&auth),
        json!({
            "food_name": "Greek Yogurt",
            "meal_type": "breakfast",
            "calories": 59,
            "protein_g": 10.0
        }),
    )
    .await;
    assert_eq!(logged.status, StatusCode::CREATED);

    let listed = get(router, "/api/food", Some(&auth)).await;
    let entries: Vec<FoodEntry> = listed.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].food_name, "Greek Yogurt");
}

#[tokio::test]
async fn test_catalog_search_route() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = get(
        router.clone(),
        "/api/food/catalog/search?q=salmon",
        Some(&auth),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let foods: Vec<CatalogFood> = response.json();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0].name, "Salmon");
    assert_eq!(foods[0].calories, 206);

    // Catalog search still requires authentication
    let anonymous = get(router, "/api/food/catalog/search?q=salmon", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_journal_routes() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let created = post(
        router.clone(),
        "/api/journal",
        Some(&auth),
        json!({"mood": 8, "energy_level": 6, "notes": "felt strong"}),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let rejected = post(
        router.clone(),
        "/api/journal",
        Some(&auth),
        json!({"mood": 0}),
    )
    .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let listed = get(router, "/api/journal", Some(&auth)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_routes_require_authentication() {
    let (resources, _user_id, _auth) = setup_authenticated().await;
    let router = routes::router(resources);

    for uri in [
        "/api/profile",
        "/api/stats/today",
        "/api/workouts",
        "/api/food",
        "/api/journal",
        "/api/dashboard",
        "/api/coach/messages",
    ] {
        let response = get(router.clone(), uri, None).await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "expected 401 for {uri}"
        );
    }
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let (resources, _user_id, _auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = get(router, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "stride-server");
}
