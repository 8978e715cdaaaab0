use crate::helpers::{
    spawn_app, spawn_app_without_push_keys, spawn_app_without_reminder_secret, subscription_body,
    REMINDER_SECRET,
};
use claim::assert_none;

#[tokio::test]
async fn remind_rejects_a_wrong_trigger_secret() {
    // arrange
    let app = spawn_app().await;
    let (_, token) = app.log_in();
    app.post_json(
        "/notifications/subscribe",
        Some(&token),
        &subscription_body("https://push.example.com/abc", "auth-secret", "p256dh-key"),
    )
    .await;

    // act
    let missing = app.trigger_remind(None).await;
    let wrong = app.trigger_remind(Some("not-the-secret")).await;

    // assert
    assert_eq!(401, missing.status().as_u16());
    assert_eq!(401, wrong.status().as_u16());
    assert_eq!(0, app.push_client.sent_count());
    assert_none!(app.subscriptions.all()[0].last_reminder_at);
}

#[tokio::test]
async fn remind_fails_when_no_trigger_secret_is_configured() {
    // arrange
    let app = spawn_app_without_reminder_secret().await;

    // act
    let response = app.trigger_remind(Some(REMINDER_SECRET)).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    assert_eq!(0, app.push_client.sent_count());
}

#[tokio::test]
async fn remind_fails_when_vapid_keys_are_not_configured() {
    // arrange
    let app = spawn_app_without_push_keys().await;

    // act
    let response = app.trigger_remind(Some(REMINDER_SECRET)).await;

    // assert
    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn remind_with_the_right_secret_reports_an_outcome() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.trigger_remind(Some(REMINDER_SECRET)).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let outcome: serde_json::Value = response.json().await.unwrap();
    // The wall clock decides between a weekday skip and an empty-store pass.
    assert!(
        outcome.get("skipped").is_some() || outcome.get("sent").is_some(),
        "unexpected outcome: {}",
        outcome
    );
}
