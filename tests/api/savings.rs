use crate::helpers::spawn_app;
use claim::{assert_none, assert_some};
use saving_challenge::challenge::{amount_for_week, TOTAL_GOAL};
use serde_json::json;

#[tokio::test]
async fn toggling_a_week_creates_then_updates_a_single_entry() {
    // arrange
    let app = spawn_app().await;
    let (user_id, token) = app.log_in();

    // act: save week 5
    let response = app
        .post_json(
            "/savings/toggle",
            Some(&token),
            &json!({ "weekNumber": 5, "isSaved": true }),
        )
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let entries = app.savings.all();
    assert_eq!(1, entries.len());
    assert_eq!(user_id, entries[0].user_id);
    assert_eq!(5, entries[0].week_number);
    assert_eq!(amount_for_week(5).unwrap(), entries[0].amount);
    assert!(entries[0].is_saved);
    assert_some!(entries[0].saved_at);

    // act: undo it
    let response = app
        .post_json(
            "/savings/toggle",
            Some(&token),
            &json!({ "weekNumber": 5, "isSaved": false }),
        )
        .await;

    // assert: the same row flipped back, no second row
    assert_eq!(200, response.status().as_u16());
    let entries = app.savings.all();
    assert_eq!(1, entries.len());
    assert!(!entries[0].is_saved);
    assert_none!(entries[0].saved_at);
}

#[tokio::test]
async fn toggle_rejects_weeks_outside_the_challenge() {
    // arrange
    let app = spawn_app().await;
    let (_, token) = app.log_in();

    for week in [0, -1, 53] {
        // act
        let response = app
            .post_json(
                "/savings/toggle",
                Some(&token),
                &json!({ "weekNumber": week, "isSaved": true }),
            )
            .await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API accepted week {}.",
            week
        );
    }
    assert!(app.savings.all().is_empty());
}

#[tokio::test]
async fn toggle_requires_a_session() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_json(
            "/savings/toggle",
            None,
            &json!({ "weekNumber": 1, "isSaved": true }),
        )
        .await;

    // assert
    assert_eq!(401, response.status().as_u16());
    assert!(app.savings.all().is_empty());
}

#[tokio::test]
async fn progress_sums_only_saved_weeks() {
    // arrange
    let app = spawn_app().await;
    let (_, token) = app.log_in();
    for week in 1..=3 {
        app.post_json(
            "/savings/toggle",
            Some(&token),
            &json!({ "weekNumber": week, "isSaved": true }),
        )
        .await;
    }
    app.post_json(
        "/savings/toggle",
        Some(&token),
        &json!({ "weekNumber": 3, "isSaved": false }),
    )
    .await;

    // act
    let response = app.get("/savings/progress", Some(&token)).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let progress: serde_json::Value = response.json().await.unwrap();
    assert_eq!(3, progress["entries"].as_array().unwrap().len());
    let expected = amount_for_week(1).unwrap() + amount_for_week(2).unwrap();
    assert_eq!(expected, progress["totalSaved"].as_i64().unwrap());
    assert_eq!(TOTAL_GOAL, progress["totalGoal"].as_i64().unwrap());
}

#[tokio::test]
async fn progress_is_scoped_to_the_session_user() {
    // arrange
    let app = spawn_app().await;
    let (_, saver_token) = app.log_in();
    let (_, empty_handed_token) = app.log_in();
    app.post_json(
        "/savings/toggle",
        Some(&saver_token),
        &json!({ "weekNumber": 1, "isSaved": true }),
    )
    .await;

    // act
    let response = app.get("/savings/progress", Some(&empty_handed_token)).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let progress: serde_json::Value = response.json().await.unwrap();
    assert_eq!(0, progress["entries"].as_array().unwrap().len());
    assert_eq!(0, progress["totalSaved"].as_i64().unwrap());
}
