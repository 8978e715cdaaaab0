//! Storage contracts consumed by the dispatcher and the HTTP layer, with a
//! Postgres implementation for production and an in-memory one for tests.

mod memory;
mod pg;

pub use memory::{InMemorySavingsLedger, InMemorySessionStore, InMemorySubscriptionStore};
pub use pg::{connection_pool, PgPool, PgSavingsLedger, PgSessionStore, PgSubscriptionStore};

use crate::models::{NewPushSubscription, PushSubscription, SavingsEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Durable mapping from push endpoint to delivery credentials and the
/// last-reminder timestamp. Every operation is atomic per row.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<PushSubscription>>;

    /// Insert-or-replace keyed by endpoint, refreshing owner, credentials and
    /// the update timestamp.
    async fn upsert(
        &self,
        user_id: Uuid,
        subscription: &NewPushSubscription,
    ) -> anyhow::Result<()>;

    /// Unconditional removal; used to prune endpoints the push service
    /// reports as gone.
    async fn delete_by_endpoint(&self, endpoint: &str) -> anyhow::Result<()>;

    /// Opt-out removal, scoped to the subscription's owner.
    async fn delete_for_user(&self, user_id: Uuid, endpoint: &str) -> anyhow::Result<()>;

    async fn touch_last_reminder(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()>;
}

/// The savings grid. The dispatcher only queries it; the toggle endpoint
/// writes it.
#[async_trait]
pub trait SavingsLedger: Send + Sync {
    /// Users who already saved for `week`; the dispatcher's exclusion set.
    async fn saved_user_ids(&self, week: i32) -> anyhow::Result<HashSet<Uuid>>;

    /// Insert-or-update the single (user, week) entry. `saved_at` is set to
    /// `now` when saving and cleared when unsaving.
    async fn set_saved(
        &self,
        user_id: Uuid,
        week: i32,
        amount: i64,
        is_saved: bool,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    async fn entries_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SavingsEntry>>;
}

/// Narrow view of the external authentication provider: bearer token in,
/// user id out.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves a session token to its user, ignoring expired sessions.
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>>;
}
