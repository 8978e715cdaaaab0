use crate::catchers::*;
use crate::configuration::Settings;
use crate::port_saver;
use crate::port_saver::Port;
use crate::push::Push;
use crate::routes::*;
use crate::store::{SavingsLedger, SessionStore, SubscriptionStore};
use rocket::{Config, Ignite, Rocket};
use secrecy::Secret;
use std::sync::Arc;

/// The storage collaborators injected at boot; production wires the Postgres
/// implementations, tests wire the in-memory ones.
pub struct Stores {
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub savings: Arc<dyn SavingsLedger>,
    pub sessions: Arc<dyn SessionStore>,
}

/// Trigger-side configuration, resolved once at startup.
pub struct TriggerConfig {
    pub secret: Option<Secret<String>>,
    /// Where a clicked notification navigates.
    pub notify_url: String,
}

/// The push transport, present only when the VAPID key pair is configured.
pub struct PushState(pub Option<Arc<dyn Push>>);

pub async fn build(
    configuration: &Settings,
    stores: Stores,
    push: Option<Arc<dyn Push>>,
) -> Result<(Rocket<Ignite>, Port), rocket::Error> {
    let (port_saver, port) = port_saver::create_pair();
    rocket::custom(Config {
        port: configuration.application.port.unwrap_or(0),
        address: configuration.application.host,
        ..Config::debug_default()
    })
    .attach(port_saver)
    .manage(stores.subscriptions)
    .manage(stores.savings)
    .manage(stores.sessions)
    .manage(PushState(push))
    .manage(TriggerConfig {
        secret: configuration.reminder.secret.clone(),
        notify_url: configuration.application.base_url.clone(),
    })
    .mount(
        "/",
        routes![
            health_check,
            remind,
            subscribe,
            unsubscribe,
            toggle_saving,
            progress
        ],
    )
    .register(
        "/",
        catchers![unprocessable_entity_to_bad_request, unauthorized_as_json],
    )
    .ignite()
    .await
    .map(|rocket| (rocket, port))
}
