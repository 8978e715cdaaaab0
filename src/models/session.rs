use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// A row of the externally-owned session table. This service only ever reads
/// it to resolve a bearer token to a user.
#[derive(Clone, Debug, Queryable)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
