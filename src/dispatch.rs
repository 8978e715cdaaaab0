//! The reminder pass: decide who still needs a nudge for the current week,
//! deliver at most one notification per subscriber per UTC day, and prune
//! endpoints the push service reports as dead.

use crate::calendar;
use crate::push::{Push, PushError, ReminderData, ReminderPayload};
use crate::store::{SavingsLedger, SubscriptionStore};
use anyhow::Context;
use chrono::{DateTime, Utc};

pub const REMINDER_TITLE: &str = "Saving Challenge";
pub const REMINDER_BODY: &str = "Belum cek tantangan minggu ini? Saatnya setor tabunganmu!";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ReminderOutcome {
    /// Not a reminder day; the pass read and wrote nothing.
    Skipped { skipped: String },
    /// A reminder day with nobody to remind.
    Idle { sent: u32, reason: String },
    /// One full sweep over the subscription list.
    Completed(ReminderReport),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ReminderReport {
    pub sent: u32,
    pub pruned: u32,
    pub total: u32,
}

/// Runs one reminder pass at `now`.
///
/// Partial progress on partial failure is accepted: each subscription is an
/// independent unit of work, nothing is rolled back, and a subscriber who got
/// a confirmed delivery is marked so the next invocation the same day skips
/// them. The dedup read is best-effort; two racing passes may both send.
#[tracing::instrument(
    name = "Run reminder pass",
    skip(now, subscriptions, ledger, push, notify_url),
    fields(date_key = %calendar::date_key(now))
)]
pub async fn run_reminder_pass(
    now: DateTime<Utc>,
    subscriptions: &dyn SubscriptionStore,
    ledger: &dyn SavingsLedger,
    push: &dyn Push,
    notify_url: &str,
) -> anyhow::Result<ReminderOutcome> {
    if !calendar::is_reminder_day(now) {
        return Ok(ReminderOutcome::Skipped {
            skipped: "today is not a reminder day".into(),
        });
    }

    let week = calendar::current_week_number(now);
    let all = subscriptions
        .list_all()
        .await
        .context("Failed to load push subscriptions.")?;
    if all.is_empty() {
        return Ok(ReminderOutcome::Idle {
            sent: 0,
            reason: "no subscriptions".into(),
        });
    }

    let saved_users = ledger
        .saved_user_ids(week)
        .await
        .context("Failed to load the saved users for the current week.")?;
    let payload = ReminderPayload {
        title: REMINDER_TITLE.into(),
        body: REMINDER_BODY.into(),
        data: ReminderData {
            url: notify_url.into(),
            date_key: calendar::date_key(now),
        },
    };

    let mut sent = 0u32;
    let mut pruned = 0u32;
    let mut failed = 0u32;

    for subscription in &all {
        if saved_users.contains(&subscription.user_id) {
            continue;
        }
        if let Some(last) = subscription.last_reminder_at {
            if calendar::is_same_day(last, now) {
                continue;
            }
        }

        match push.send_reminder(&subscription.target(), &payload).await {
            Ok(()) => {
                sent += 1;
                // Only a confirmed delivery marks the subscriber as reminded.
                if let Err(error) = subscriptions
                    .touch_last_reminder(subscription.id, now)
                    .await
                {
                    tracing::error!(
                        error.cause_chain = ?error,
                        endpoint = %subscription.endpoint,
                        "Failed to record the reminder timestamp",
                    );
                }
            }
            Err(PushError::EndpointGone) => {
                failed += 1;
                match subscriptions.delete_by_endpoint(&subscription.endpoint).await {
                    Ok(()) => pruned += 1,
                    Err(error) => tracing::error!(
                        error.cause_chain = ?error,
                        endpoint = %subscription.endpoint,
                        "Failed to prune a dead push subscription",
                    ),
                }
            }
            Err(error) => {
                // Transient; the next reminder day is the retry.
                failed += 1;
                tracing::warn!(
                    error.cause_chain = ?error,
                    endpoint = %subscription.endpoint,
                    "Skipping a subscriber after a failed push delivery",
                );
            }
        }
    }

    tracing::info!(week, sent, pruned, failed, total = all.len(), "Reminder pass finished");
    Ok(ReminderOutcome::Completed(ReminderReport {
        sent,
        pruned,
        total: all.len() as u32,
    }))
}
