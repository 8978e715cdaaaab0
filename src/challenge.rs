//! The fixed 52-week incremental saving challenge (roughly Rp30 juta over a
//! year): week `n` asks for `n` times the weekly step.

pub const CHALLENGE_WEEKS: i32 = 52;

const WEEKLY_STEP: i64 = 22_000;

/// Sum of all 52 weekly amounts.
pub const TOTAL_GOAL: i64 =
    WEEKLY_STEP * (CHALLENGE_WEEKS as i64 * (CHALLENGE_WEEKS as i64 + 1)) / 2;

/// The deposit expected for `week`, or `None` for weeks outside the calendar.
pub fn amount_for_week(week: i32) -> Option<i64> {
    if (1..=CHALLENGE_WEEKS).contains(&week) {
        Some(week as i64 * WEEKLY_STEP)
    } else {
        None
    }
}
