use crate::schema::savings_entries;
use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// One (user, week) cell of the challenge grid. At most one row per pair;
/// toggling a week updates the row in place, it is never deleted.
#[derive(Clone, Debug, Queryable, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEntry {
    pub id: i32,
    pub user_id: Uuid,
    pub week_number: i32,
    pub amount: i64,
    pub is_saved: bool,
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[table_name = "savings_entries"]
pub struct NewSavingsEntryRow {
    pub user_id: Uuid,
    pub week_number: i32,
    pub amount: i64,
    pub is_saved: bool,
    pub saved_at: Option<DateTime<Utc>>,
}
