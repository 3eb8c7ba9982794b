// ABOUTME: Integration test for the onboarding profile lifecycle
// ABOUTME: Create with onboarding pending, read back, complete, verify timestamps

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::{get, patch, post, setup_authenticated};
use serde_json::json;
use stride_server::models::{FitnessGoal, UserProfile};
use stride_server::routes;

#[tokio::test]
async fn test_onboarding_profile_lifecycle() {
    let (resources, user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    // No profile before onboarding
    let missing = get(router.clone(), "/api/profile", Some(&auth)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    // Create with onboarding still pending
    let created = post(
        router.clone(),
        "/api/profile",
        Some(&auth),
        json!({
            "full_name": "Ada Lovelace",
            "fitness_goal": "build-muscle",
            "onboarding_completed": false,
            "onboarding_step": 2
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let profile: UserProfile = created.json();
    assert_eq!(profile.user_id, user_id);
    assert!(!profile.onboarding_completed);

    // A read immediately after reflects the same flag
    let read = get(router.clone(), "/api/profile", Some(&auth)).await;
    assert_eq!(read.status, StatusCode::OK);
    let read_profile: UserProfile = read.json();
    assert!(!read_profile.onboarding_completed);
    assert_eq!(read_profile.fitness_goal, Some(FitnessGoal::BuildMuscle));

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    // Mark onboarding complete
    let updated = patch(
        router.clone(),
        "/api/profile",
        Some(&auth),
        json!({"onboarding_completed": true}),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    // The update is visible and updated_at moved strictly past created_at
    let after = get(router, "/api/profile", Some(&auth)).await;
    let final_profile: UserProfile = after.json();
    assert!(final_profile.onboarding_completed);
    assert!(final_profile.updated_at > final_profile.created_at);
    // Untouched fields survived the partial update
    assert_eq!(final_profile.full_name, "Ada Lovelace");
    assert_eq!(final_profile.fitness_goal, Some(FitnessGoal::BuildMuscle));
}

#[tokio::test]
async fn test_profile_create_requires_a_name() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = post(
        router,
        "/api/profile",
        Some(&auth),
        json!({"onboarding_completed": false}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_profile_create_twice_conflicts() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);
    let body = json!({"full_name": "Ada"});

    let first = post(router.clone(), "/api/profile", Some(&auth), body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post(router, "/api/profile", Some(&auth), body).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_profile_update_without_create_is_not_found() {
    let (resources, _user_id, auth) = setup_authenticated().await;
    let router = routes::router(resources);

    let response = patch(
        router,
        "/api/profile",
        Some(&auth),
        json!({"nickname": "Ada"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["code"], "RESOURCE_NOT_FOUND");
}
