use once_cell::sync::Lazy;
use saving_challenge::configuration::get_configuration;
use saving_challenge::push::{Push, PushError, PushTarget, ReminderPayload};
use saving_challenge::startup::{build, Stores};
use saving_challenge::store::{
    InMemorySavingsLedger, InMemorySessionStore, InMemorySubscriptionStore,
};
use saving_challenge::telemetry::{get_subscriber, init_subscriber};
use secrecy::Secret;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const REMINDER_SECRET: &str = "test-reminder-secret";

/// Push transport double that records deliveries instead of making them.
pub struct MockPushClient {
    pub sent: Mutex<Vec<(PushTarget, ReminderPayload)>>,
}

impl MockPushClient {
    fn new() -> Arc<MockPushClient> {
        Arc::new(MockPushClient {
            sent: Mutex::new(vec![]),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Push for MockPushClient {
    async fn send_reminder(
        &self,
        target: &PushTarget,
        payload: &ReminderPayload,
    ) -> Result<(), PushError> {
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), payload.clone()));
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub subscriptions: Arc<InMemorySubscriptionStore>,
    pub savings: Arc<InMemorySavingsLedger>,
    pub sessions: Arc<InMemorySessionStore>,
    pub push_client: Arc<MockPushClient>,
}

impl TestApp {
    /// Mints a session the way the external auth provider would.
    pub fn log_in(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(&token, user_id);
        (user_id, token)
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        let mut request = reqwest::Client::new()
            .post(format!("{}{}", self.address, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn delete_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        let mut request = reqwest::Client::new()
            .delete(format!("{}{}", self.address, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = reqwest::Client::new().get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn trigger_remind(&self, key: Option<&str>) -> reqwest::Response {
        let mut request =
            reqwest::Client::new().post(format!("{}/notifications/remind", self.address));
        if let Some(key) = key {
            request = request.header("x-reminder-key", key);
        }
        request.send().await.expect("Failed to execute request.")
    }
}

pub fn subscription_body(endpoint: &str, auth: &str, p256dh: &str) -> serde_json::Value {
    serde_json::json!({
        "subscription": {
            "endpoint": endpoint,
            "keys": { "auth": auth, "p256dh": p256dh }
        }
    })
}

pub async fn spawn_app() -> TestApp {
    spawn(Some(Secret::new(REMINDER_SECRET.to_string())), true).await
}

pub async fn spawn_app_without_reminder_secret() -> TestApp {
    spawn(None, true).await
}

pub async fn spawn_app_without_push_keys() -> TestApp {
    spawn(Some(Secret::new(REMINDER_SECRET.to_string())), false).await
}

async fn spawn(reminder_secret: Option<Secret<String>>, with_push: bool) -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = Some(0);
        c.reminder.secret = reminder_secret;
        c
    };

    let subscriptions = Arc::new(InMemorySubscriptionStore::new());
    let savings = Arc::new(InMemorySavingsLedger::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let push_client = MockPushClient::new();

    let stores = Stores {
        subscriptions: subscriptions.clone(),
        savings: savings.clone(),
        sessions: sessions.clone(),
    };
    let push: Option<Arc<dyn Push>> = if with_push {
        Some(push_client.clone())
    } else {
        None
    };

    let (app, port) = build(&configuration, stores, push).await.unwrap();
    let _ = tokio::spawn(app.launch());
    TestApp {
        address: format!("http://127.0.0.1:{}", port.get().await),
        subscriptions,
        savings,
        sessions,
        push_client,
    }
}
