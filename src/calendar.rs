//! Challenge-calendar arithmetic.
//!
//! Every day boundary in this crate is a UTC day: week numbers, reminder-day
//! eligibility and the per-day dedup key all derive from the UTC calendar.

use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::challenge::CHALLENGE_WEEKS;

/// 1-based week of the saving challenge: elapsed whole weeks since January 1
/// of `date`'s year, plus one, clamped into `[1, CHALLENGE_WEEKS]`.
pub fn current_week_number(date: DateTime<Utc>) -> i32 {
    let elapsed_weeks = (date.ordinal0() / 7) as i32;
    (elapsed_weeks + 1).clamp(1, CHALLENGE_WEEKS)
}

/// Calendar-day identifier (`YYYY-MM-DD`), stable across times of day.
///
/// Used both as the reminder dedup key and as payload metadata so the client
/// can drop duplicate notifications.
pub fn date_key(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reminders only go out on Friday, Saturday and Sunday.
pub fn is_reminder_day(date: DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

pub fn is_same_day(first: DateTime<Utc>, second: DateTime<Utc>) -> bool {
    first.date_naive() == second.date_naive()
}
