// ABOUTME: Integration tests for the coach conversation and progress dashboard
// ABOUTME: Verifies persistence of exchanges and data-derived achievements

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::{delete, get, patch, post, setup_authenticated};
use serde_json::json;
use stride_server::routes;
use stride_server::routes::coach::ExchangeResponse;
use stride_server::services::DashboardOverview;

#[tokio::test]
async fn test_coach_conversation_round_trip() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let sent = post(
        router.clone(),
        "/api/coach/messages",
        Some(&auth),
        json!({"content": "Create a beginner workout plan"}),
    )
    .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    let exchange: ExchangeResponse = sent.json();
    assert_eq!(exchange.message, "Create a beginner workout plan");
    assert!(!exchange.reply.is_empty());

    // The exchange is persisted and listed chronologically
    let history = get(router.clone(), "/api/coach/messages", Some(&auth)).await;
    let exchanges: Vec<ExchangeResponse> = history.json();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].id, exchange.id);

    // Clearing removes the conversation
    let cleared = delete(router.clone(), "/api/coach/messages", Some(&auth)).await;
    assert_eq!(cleared.status, StatusCode::NO_CONTENT);

    let after = get(router, "/api/coach/messages", Some(&auth)).await;
    assert_eq!(after.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_coach_rejects_empty_messages() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = post(
        router,
        "/api/coach/messages",
        Some(&auth),
        json!({"content": "   "}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_coach_prompts_surface_suggestions() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = get(router, "/api/coach/prompts", Some(&auth)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body["prompts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_reflects_logged_data() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    // Empty account: nothing unlocked, empty week
    let empty = get(router.clone(), "/api/dashboard", Some(&auth)).await;
    assert_eq!(empty.status, StatusCode::OK);
    let overview: DashboardOverview = empty.json();
    assert!(overview.today.is_none());
    assert_eq!(overview.week.workouts, 0);
    assert!(overview.achievements.iter().all(|a| !a.unlocked));

    // Log a workout and hit the hydration target
    post(
        router.clone(),
        "/api/workouts",
        Some(&auth),
        json!({"name": "Leg Day", "workout_type": "strength", "duration_minutes": 40}),
    )
    .await;
    patch(
        router.clone(),
        "/api/stats/today",
        Some(&auth),
        json!({"water_glasses": 8}),
    )
    .await;

    let filled = get(router, "/api/dashboard", Some(&auth)).await;
    let overview: DashboardOverview = filled.json();

    assert_eq!(overview.week.workouts, 1);
    assert_eq!(overview.week.minutes, 40);
    assert_eq!(overview.recent_workouts.len(), 1);
    assert_eq!(overview.today.as_ref().unwrap().water_glasses, 8);

    let by_id = |id: &str| {
        overview
            .achievements
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("missing achievement {id}"))
    };
    assert!(by_id("first-workout").unlocked);
    assert!(by_id("hydration-hero").unlocked);
    assert_eq!(by_id("week-warrior").progress, 1);
    assert!(!by_id("week-warrior").unlocked);
}
