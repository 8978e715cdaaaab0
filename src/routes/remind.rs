use crate::dispatch::{run_reminder_pass, ReminderOutcome};
use crate::guards::ReminderKey;
use crate::routes::error_chain_fmt;
use crate::startup::{PushState, TriggerConfig};
use crate::store::{SavingsLedger, SubscriptionStore};
use chrono::Utc;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response, State};
use std::sync::Arc;

/// Externally-triggered reminder pass. The `ReminderKey` guard has already
/// verified the shared secret; the VAPID check below is the last
/// configuration precondition before storage is touched.
#[post("/notifications/remind")]
pub async fn remind(
    _key: ReminderKey,
    push: &State<PushState>,
    subscriptions: &State<Arc<dyn SubscriptionStore>>,
    savings: &State<Arc<dyn SavingsLedger>>,
    trigger: &State<TriggerConfig>,
) -> Result<Json<ReminderOutcome>, RemindError> {
    let push = match &push.0 {
        Some(push) => push,
        None => return Err(RemindError::PushNotConfigured),
    };
    let outcome = run_reminder_pass(
        Utc::now(),
        subscriptions.inner().as_ref(),
        savings.inner().as_ref(),
        push.as_ref(),
        &trigger.notify_url,
    )
    .await?;
    Ok(Json(outcome))
}

#[derive(thiserror::Error)]
pub enum RemindError {
    #[error("Web push VAPID keys are not configured")]
    PushNotConfigured,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RemindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for RemindError {
    fn respond_to(self, _request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("RemindError: {:?}", self);
        Response::build()
            .status(match self {
                RemindError::PushNotConfigured => Status::InternalServerError,
                RemindError::UnexpectedError(_) => Status::InternalServerError,
            })
            .ok()
    }
}
