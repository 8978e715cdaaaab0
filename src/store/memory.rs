use super::{SavingsLedger, SessionStore, SubscriptionStore};
use crate::models::{NewPushSubscription, PushSubscription, SavingsEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Mutex-over-Vec stand-in for the Postgres store, with the same upsert and
/// scoping semantics. Request-level tests run the whole app against these.
pub struct InMemorySubscriptionStore {
    rows: Mutex<Vec<PushSubscription>>,
    next_id: AtomicI32,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn all(&self) -> Vec<PushSubscription> {
        self.rows.lock().unwrap().clone()
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn list_all(&self) -> anyhow::Result<Vec<PushSubscription>> {
        Ok(self.all())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        subscription: &NewPushSubscription,
    ) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        match rows
            .iter_mut()
            .find(|row| row.endpoint == subscription.endpoint)
        {
            Some(row) => {
                row.user_id = user_id;
                row.auth = subscription.auth.clone();
                row.p256dh = subscription.p256dh.clone();
                row.updated_at = now;
            }
            None => rows.push(PushSubscription {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                user_id,
                endpoint: subscription.endpoint.clone(),
                auth: subscription.auth.clone(),
                p256dh: subscription.p256dh.clone(),
                last_reminder_at: None,
                created_at: now,
                updated_at: now,
            }),
        }
        Ok(())
    }

    async fn delete_by_endpoint(&self, endpoint: &str) -> anyhow::Result<()> {
        self.rows.lock().unwrap().retain(|row| row.endpoint != endpoint);
        Ok(())
    }

    async fn delete_for_user(&self, user_id: Uuid, endpoint: &str) -> anyhow::Result<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|row| !(row.endpoint == endpoint && row.user_id == user_id));
        Ok(())
    }

    async fn touch_last_reminder(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
            row.last_reminder_at = Some(at);
            row.updated_at = at;
        }
        Ok(())
    }
}

pub struct InMemorySavingsLedger {
    rows: Mutex<Vec<SavingsEntry>>,
    next_id: AtomicI32,
}

impl InMemorySavingsLedger {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn all(&self) -> Vec<SavingsEntry> {
        self.rows.lock().unwrap().clone()
    }
}

impl Default for InMemorySavingsLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SavingsLedger for InMemorySavingsLedger {
    async fn saved_user_ids(&self, week: i32) -> anyhow::Result<HashSet<Uuid>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.week_number == week && row.is_saved)
            .map(|row| row.user_id)
            .collect())
    }

    async fn set_saved(
        &self,
        user_id: Uuid,
        week: i32,
        amount: i64,
        is_saved: bool,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let saved_at = if is_saved { Some(now) } else { None };
        match rows
            .iter_mut()
            .find(|row| row.user_id == user_id && row.week_number == week)
        {
            Some(row) => {
                row.is_saved = is_saved;
                row.saved_at = saved_at;
            }
            None => rows.push(SavingsEntry {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                user_id,
                week_number: week,
                amount,
                is_saved,
                saved_at,
            }),
        }
        Ok(())
    }

    async fn entries_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SavingsEntry>> {
        let mut entries: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.week_number);
        Ok(entries)
    }
}

pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Uuid>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, token: &str, user_id: Uuid) {
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_string(), user_id);
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        Ok(self.sessions.lock().unwrap().get(token).copied())
    }
}
