mod vapid;

use async_trait::async_trait;
pub use vapid::VapidPushClient;

/// Delivery address of one browser push channel: the endpoint plus the two
/// client-generated encryption secrets.
#[derive(Clone, Debug)]
pub struct PushTarget {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// What the service worker receives; `data.url` is where a click navigates
/// and `data.dateKey` lets the client drop same-day duplicates.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    pub data: ReminderData,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ReminderData {
    pub url: String,
    #[serde(rename = "dateKey")]
    pub date_key: String,
}

#[derive(thiserror::Error, Debug)]
pub enum PushError {
    /// The push service reported the endpoint expired or unregistered; it
    /// will never accept a delivery again.
    #[error("the push endpoint is gone")]
    EndpointGone,
    #[error("the push service did not answer in time")]
    Timeout,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait Push: Send + Sync {
    async fn send_reminder(
        &self,
        target: &PushTarget,
        payload: &ReminderPayload,
    ) -> Result<(), PushError>;
}
