// ABOUTME: Integration tests for the daily stats store
// ABOUTME: Exercises the atomic upsert, field merging, and concurrency safety

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{create_test_database, create_test_user};
use stride_server::models::DailyStatsPatch;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

#[tokio::test]
async fn test_read_before_any_write_is_none() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let stats = db.get_daily_stats(user_id, day()).await.unwrap();
    assert!(stats.is_none());
}

#[tokio::test]
async fn test_first_upsert_seeds_zero_counters() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let patch = DailyStatsPatch {
        steps: Some(4200),
        ..Default::default()
    };
    let stats = db.upsert_daily_stats(user_id, day(), &patch).await.unwrap();

    // Never partially populated: untouched counters are zero, not absent
    assert_eq!(stats.steps, 4200);
    assert_eq!(stats.calories_burned, 0);
    assert_eq!(stats.water_glasses, 0);
    assert_eq!(stats.workouts_completed, 0);
    assert!(stats.weight_kg.is_none());
}

#[tokio::test]
async fn test_disjoint_upserts_merge_into_one_row() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    db.upsert_daily_stats(
        user_id,
        day(),
        &DailyStatsPatch {
            steps: Some(8000),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let merged = db
        .upsert_daily_stats(
            user_id,
            day(),
            &DailyStatsPatch {
                water_glasses: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Union of both updates, not a reset
    assert_eq!(merged.steps, 8000);
    assert_eq!(merged.water_glasses, 5);

    let read_back = db.get_daily_stats(user_id, day()).await.unwrap().unwrap();
    assert_eq!(read_back.steps, 8000);
    assert_eq!(read_back.water_glasses, 5);
}

#[tokio::test]
async fn test_concurrent_upserts_produce_a_single_row() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let steps = DailyStatsPatch {
        steps: Some(1234),
        ..Default::default()
    };
    let water = DailyStatsPatch {
        water_glasses: Some(3),
        ..Default::default()
    };

    let (a, b) = tokio::join!(
        db.upsert_daily_stats(user_id, day(), &steps),
        db.upsert_daily_stats(user_id, day(), &water),
    );
    a.unwrap();
    b.unwrap();

    let row = db.get_daily_stats(user_id, day()).await.unwrap().unwrap();
    assert_eq!(row.steps, 1234);
    assert_eq!(row.water_glasses, 3);

    // The uniqueness constraint means exactly one row exists for the day
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM daily_stats WHERE user_id = $1 AND date = $2",
    )
    .bind(user_id.to_string())
    .bind(day())
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_days_and_users_are_isolated() {
    let db = create_test_database().await.unwrap();
    let (user_a, _) = create_test_user(&db).await.unwrap();
    let (user_b, _) = common::create_test_user_with_email(&db, "b@example.com")
        .await
        .unwrap();

    let other_day = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
    let patch = DailyStatsPatch {
        steps: Some(100),
        ..Default::default()
    };

    db.upsert_daily_stats(user_a, day(), &patch).await.unwrap();

    assert!(db.get_daily_stats(user_a, other_day).await.unwrap().is_none());
    assert!(db.get_daily_stats(user_b, day()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_bumps_updated_at_only() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let first = db
        .upsert_daily_stats(
            user_id,
            day(),
            &DailyStatsPatch {
                steps: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let second = db
        .upsert_daily_stats(
            user_id,
            day(),
            &DailyStatsPatch {
                steps: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}
