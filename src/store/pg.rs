use super::{SavingsLedger, SessionStore, SubscriptionStore};
use crate::configuration::DatabaseSettings;
use crate::models::{
    NewPushSubscription, NewPushSubscriptionRow, NewSavingsEntryRow, PushSubscription,
    SavingsEntry, Session,
};
use crate::schema::{push_subscriptions, savings_entries, sessions};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::pg::upsert::excluded;
use diesel::r2d2::{ConnectionManager, Pool};
use std::collections::HashSet;
use tokio::task::spawn_blocking;
use uuid::Uuid;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub fn connection_pool(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(settings.connection_string());
    Pool::builder()
        .build(manager)
        .context("Failed to build the Postgres connection pool.")
}

pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    #[tracing::instrument(name = "List push subscriptions", skip(self))]
    async fn list_all(&self) -> anyhow::Result<Vec<PushSubscription>> {
        let pool = self.pool.clone();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            push_subscriptions::table
                .load::<PushSubscription>(&conn)
                .context("Failed to load push subscriptions.")
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Upsert push subscription", skip(self, subscription))]
    async fn upsert(
        &self,
        user_id: Uuid,
        subscription: &NewPushSubscription,
    ) -> anyhow::Result<()> {
        let pool = self.pool.clone();
        let now = Utc::now();
        let row = NewPushSubscriptionRow {
            user_id,
            endpoint: subscription.endpoint.clone(),
            auth: subscription.auth.clone(),
            p256dh: subscription.p256dh.clone(),
            created_at: now,
            updated_at: now,
        };
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            diesel::insert_into(push_subscriptions::table)
                .values(&row)
                .on_conflict(push_subscriptions::endpoint)
                .do_update()
                .set((
                    push_subscriptions::user_id.eq(excluded(push_subscriptions::user_id)),
                    push_subscriptions::auth.eq(excluded(push_subscriptions::auth)),
                    push_subscriptions::p256dh.eq(excluded(push_subscriptions::p256dh)),
                    push_subscriptions::updated_at.eq(excluded(push_subscriptions::updated_at)),
                ))
                .execute(&conn)
                .context("Failed to upsert the push subscription.")?;
            Ok(())
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Delete push subscription", skip(self))]
    async fn delete_by_endpoint(&self, endpoint: &str) -> anyhow::Result<()> {
        let pool = self.pool.clone();
        let endpoint = endpoint.to_string();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            diesel::delete(
                push_subscriptions::table.filter(push_subscriptions::endpoint.eq(endpoint)),
            )
            .execute(&conn)
            .context("Failed to delete the push subscription.")?;
            Ok(())
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Delete push subscription for user", skip(self))]
    async fn delete_for_user(&self, user_id: Uuid, endpoint: &str) -> anyhow::Result<()> {
        let pool = self.pool.clone();
        let endpoint = endpoint.to_string();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            diesel::delete(
                push_subscriptions::table
                    .filter(push_subscriptions::endpoint.eq(endpoint))
                    .filter(push_subscriptions::user_id.eq(user_id)),
            )
            .execute(&conn)
            .context("Failed to delete the push subscription.")?;
            Ok(())
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Touch last reminder", skip(self))]
    async fn touch_last_reminder(&self, id: i32, at: DateTime<Utc>) -> anyhow::Result<()> {
        let pool = self.pool.clone();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            diesel::update(push_subscriptions::table.filter(push_subscriptions::id.eq(id)))
                .set((
                    push_subscriptions::last_reminder_at.eq(Some(at)),
                    push_subscriptions::updated_at.eq(at),
                ))
                .execute(&conn)
                .context("Failed to record the reminder timestamp.")?;
            Ok(())
        })
        .await
        .context("Blocking storage task panicked.")?
    }
}

pub struct PgSavingsLedger {
    pool: PgPool,
}

impl PgSavingsLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavingsLedger for PgSavingsLedger {
    #[tracing::instrument(name = "Load saved users for week", skip(self))]
    async fn saved_user_ids(&self, week: i32) -> anyhow::Result<HashSet<Uuid>> {
        let pool = self.pool.clone();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            let users = savings_entries::table
                .select(savings_entries::user_id)
                .filter(savings_entries::week_number.eq(week))
                .filter(savings_entries::is_saved.eq(true))
                .load::<Uuid>(&conn)
                .context("Failed to load saved users.")?;
            Ok(users.into_iter().collect())
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Toggle savings entry", skip(self))]
    async fn set_saved(
        &self,
        user_id: Uuid,
        week: i32,
        amount: i64,
        is_saved: bool,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let pool = self.pool.clone();
        let row = NewSavingsEntryRow {
            user_id,
            week_number: week,
            amount,
            is_saved,
            saved_at: if is_saved { Some(now) } else { None },
        };
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            diesel::insert_into(savings_entries::table)
                .values(&row)
                .on_conflict((savings_entries::user_id, savings_entries::week_number))
                .do_update()
                .set((
                    savings_entries::is_saved.eq(excluded(savings_entries::is_saved)),
                    savings_entries::saved_at.eq(excluded(savings_entries::saved_at)),
                ))
                .execute(&conn)
                .context("Failed to toggle the savings entry.")?;
            Ok(())
        })
        .await
        .context("Blocking storage task panicked.")?
    }

    #[tracing::instrument(name = "Load savings entries", skip(self))]
    async fn entries_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SavingsEntry>> {
        let pool = self.pool.clone();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            savings_entries::table
                .filter(savings_entries::user_id.eq(user_id))
                .order(savings_entries::week_number.asc())
                .load::<SavingsEntry>(&conn)
                .context("Failed to load savings entries.")
        })
        .await
        .context("Blocking storage task panicked.")?
    }
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    #[tracing::instrument(name = "Resolve session token", skip(self, token))]
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        let pool = self.pool.clone();
        let token = token.to_string();
        spawn_blocking(move || {
            let conn = pool.get().context("Failed to check out a connection.")?;
            let session = sessions::table
                .filter(sessions::token.eq(token))
                .first::<Session>(&conn)
                .optional()
                .context("Failed to look up the session token.")?;
            Ok(session
                .filter(|session| session.expires_at > Utc::now())
                .map(|session| session.user_id))
        })
        .await
        .context("Blocking storage task panicked.")?
    }
}
