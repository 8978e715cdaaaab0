use crate::push::PushTarget;
use crate::schema::push_subscriptions;
use chrono::offset::Utc;
use chrono::DateTime;
use uuid::Uuid;

/// One browser push channel. The endpoint is globally unique; re-registering
/// the same endpoint replaces the owner and credentials in place.
#[derive(Clone, Debug, Queryable)]
pub struct PushSubscription {
    pub id: i32,
    pub user_id: Uuid,
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
    pub last_reminder_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PushSubscription {
    pub fn target(&self) -> PushTarget {
        PushTarget {
            endpoint: self.endpoint.clone(),
            p256dh: self.p256dh.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// A validated opt-in payload: the push endpoint and its delivery keys.
#[derive(Clone, Debug)]
pub struct NewPushSubscription {
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
}

#[derive(Insertable)]
#[table_name = "push_subscriptions"]
pub struct NewPushSubscriptionRow {
    pub user_id: Uuid,
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
