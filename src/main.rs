use saving_challenge::configuration::get_configuration;
use saving_challenge::push::{Push, VapidPushClient};
use saving_challenge::startup::{build, Stores};
use saving_challenge::store::{
    connection_pool, PgSavingsLedger, PgSessionStore, PgSubscriptionStore,
};
use saving_challenge::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let subscriber = get_subscriber("saving-challenge".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool = connection_pool(&configuration.database).expect("Failed to connect to Postgres.");
    let conn = pool.get().expect("Failed to check out a connection.");
    diesel_migrations::run_pending_migrations(&*conn)
        .expect("Failed to run database migrations.");
    drop(conn);

    let push: Option<Arc<dyn Push>> = match (
        configuration.push.vapid_public_key.as_ref(),
        configuration.push.vapid_private_key.clone(),
    ) {
        (Some(_), Some(private_key)) => {
            let client = VapidPushClient::new(
                private_key,
                configuration.push.contact.clone(),
                configuration.push.timeout(),
            )
            .expect("Failed to initialize the push client.");
            Some(Arc::new(client))
        }
        _ => {
            tracing::warn!("VAPID keys are not configured; the reminder pass will refuse to run");
            None
        }
    };

    let stores = Stores {
        subscriptions: Arc::new(PgSubscriptionStore::new(pool.clone())),
        savings: Arc::new(PgSavingsLedger::new(pool.clone())),
        sessions: Arc::new(PgSessionStore::new(pool)),
    };

    build(&configuration, stores, push).await?.0.launch().await?;
    Ok(())
}
