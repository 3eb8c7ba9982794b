// ABOUTME: Integration tests for workout, food, and journal stores
// ABOUTME: Covers ordering, limits, day-window filtering, and validation

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, NaiveDate, Utc};
use common::{create_test_database, create_test_user};
use stride_server::database::{NewFoodEntry, NewJournalEntry, NewWorkout};
use stride_server::errors::ErrorCode;
use stride_server::models::MealType;
use uuid::Uuid;

fn workout(name: &str, minutes: i64) -> NewWorkout {
    NewWorkout {
        name: name.to_owned(),
        workout_type: "strength".to_owned(),
        duration_minutes: minutes,
        calories_burned: Some(200),
        notes: None,
    }
}

fn food(name: &str) -> NewFoodEntry {
    NewFoodEntry {
        food_name: name.to_owned(),
        meal_type: MealType::Lunch,
        calories: Some(400),
        protein_g: Some(30.0),
        carbs_g: Some(40.0),
        fat_g: Some(10.0),
        quantity: Some("1 serving".to_owned()),
    }
}

#[tokio::test]
async fn test_workouts_list_newest_first_bounded_by_limit() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    for i in 0..5 {
        db.log_workout(user_id, workout(&format!("session-{i}"), 20 + i))
            .await
            .unwrap();
        // Insertion timestamps must differ for the ordering assertion
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let all = db.recent_workouts(user_id, 10).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].name, "session-4");
    assert_eq!(all[4].name, "session-0");
    assert!(all.windows(2).all(|w| w[0].completed_at >= w[1].completed_at));

    let bounded = db.recent_workouts(user_id, 3).await.unwrap();
    assert_eq!(bounded.len(), 3);
    assert_eq!(bounded[0].name, "session-4");
}

#[tokio::test]
async fn test_workout_timestamps_are_set_by_the_store() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let before = Utc::now();
    let logged = db.log_workout(user_id, workout("run", 30)).await.unwrap();
    let after = Utc::now();

    assert!(logged.completed_at >= before && logged.completed_at <= after);
    assert_eq!(logged.completed_at, logged.created_at);
}

#[tokio::test]
async fn test_food_day_window_excludes_adjacent_days() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let today_entry = db.log_food(user_id, food("today-salad")).await.unwrap();
    let today = today_entry.logged_at.date_naive();

    // Plant entries on the adjacent days directly, bypassing the stamping
    for (name, offset) in [("yesterday-soup", -1i64), ("tomorrow-toast", 1)] {
        let logged_at = today_entry.logged_at + Duration::days(offset);
        sqlx::query(
            "INSERT INTO food_entries (id, user_id, food_name, meal_type, logged_at, created_at) \
             VALUES ($1, $2, $3, 'dinner', $4, $4)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(name)
        .bind(logged_at)
        .execute(db.pool())
        .await
        .unwrap();
    }

    let entries = db.food_entries_for_day(user_id, today).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].food_name, "today-salad");

    let yesterday = db
        .food_entries_for_day(user_id, today - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(yesterday.len(), 1);
    assert_eq!(yesterday[0].food_name, "yesterday-soup");
}

#[tokio::test]
async fn test_food_entries_round_trip_meal_and_macros() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let entry = db.log_food(user_id, food("chicken bowl")).await.unwrap();
    let listed = db
        .food_entries_for_day(user_id, entry.logged_at.date_naive())
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].meal_type, MealType::Lunch);
    assert_eq!(listed[0].calories, Some(400));
    assert_eq!(listed[0].protein_g, Some(30.0));
}

#[tokio::test]
async fn test_journal_scores_validated_and_listed_newest_first() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_test_user(&db).await.unwrap();

    let out_of_range = db
        .create_journal_entry(
            user_id,
            NewJournalEntry {
                mood: Some(11),
                energy_level: None,
                notes: None,
                date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            },
        )
        .await;
    assert_eq!(out_of_range.unwrap_err().code, ErrorCode::ValueOutOfRange);

    for day in 1..=3 {
        db.create_journal_entry(
            user_id,
            NewJournalEntry {
                mood: Some(day),
                energy_level: Some(5),
                notes: Some(format!("day {day}")),
                date: NaiveDate::from_ymd_opt(2025, 6, day as u32).unwrap(),
            },
        )
        .await
        .unwrap();
    }

    let entries = db.recent_journal_entries(user_id, 2).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].notes.as_deref(), Some("day 3"));
    assert_eq!(entries[1].notes.as_deref(), Some("day 2"));
}

#[tokio::test]
async fn test_records_are_scoped_to_their_user() {
    let db = create_test_database().await.unwrap();
    let (user_a, _) = create_test_user(&db).await.unwrap();
    let (user_b, _) = common::create_test_user_with_email(&db, "b@example.com")
        .await
        .unwrap();

    db.log_workout(user_a, workout("private", 30)).await.unwrap();

    assert_eq!(db.recent_workouts(user_b, 10).await.unwrap().len(), 0);
    assert_eq!(db.recent_workouts(user_a, 10).await.unwrap().len(), 1);
}
