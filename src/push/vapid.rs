use crate::push::{Push, PushError, PushTarget, ReminderPayload};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use web_push::{
    ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushClient, WebPushError,
    WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

/// Web Push delivery with VAPID authentication. Each send signs a JWT with
/// the configured private key and encrypts the payload for the target's keys.
pub struct VapidPushClient {
    client: WebPushClient,
    private_key: Secret<String>,
    contact: String,
    timeout: Duration,
}

impl VapidPushClient {
    pub fn new(
        private_key: Secret<String>,
        contact: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = WebPushClient::new().context("Failed to initialize the web push client.")?;
        Ok(Self {
            client,
            private_key,
            contact,
            timeout,
        })
    }
}

#[async_trait]
impl Push for VapidPushClient {
    async fn send_reminder(
        &self,
        target: &PushTarget,
        payload: &ReminderPayload,
    ) -> Result<(), PushError> {
        let subscription =
            SubscriptionInfo::new(&target.endpoint, &target.p256dh, &target.auth);
        let body =
            serde_json::to_vec(payload).context("Failed to serialize the reminder payload.")?;

        let mut signature = VapidSignatureBuilder::from_base64(
            self.private_key.expose_secret(),
            URL_SAFE_NO_PAD,
            &subscription,
        )
        .map_err(|e| anyhow!("Failed to read the VAPID private key: {}", e))?;
        signature.add_claim("sub", self.contact.clone());

        let mut message = WebPushMessageBuilder::new(&subscription)
            .map_err(|e| anyhow!("Failed to address the push message: {}", e))?;
        message.set_payload(ContentEncoding::Aes128Gcm, &body);
        message.set_vapid_signature(
            signature
                .build()
                .map_err(|e| anyhow!("Failed to sign the push message: {}", e))?,
        );
        let message = message
            .build()
            .map_err(|e| anyhow!("Failed to encrypt the push message: {}", e))?;

        match tokio::time::timeout(self.timeout, self.client.send(message)).await {
            Err(_) => Err(PushError::Timeout),
            Ok(Ok(())) => Ok(()),
            Ok(Err(WebPushError::EndpointNotFound)) | Ok(Err(WebPushError::EndpointNotValid)) => {
                Err(PushError::EndpointGone)
            }
            Ok(Err(e)) => Err(PushError::Unexpected(anyhow!("Push delivery failed: {}", e))),
        }
    }
}
