use crate::startup::TriggerConfig;
use anyhow::anyhow;
use rocket::http::Status;
use rocket::outcome::Outcome::{Error as Failure, Success};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use secrecy::ExposeSecret;

/// Header the external trigger uses to prove it may start a reminder pass.
pub const REMINDER_KEY_HEADER: &str = "x-reminder-key";

/// Proof that the request carried the configured trigger secret. An absent
/// server-side secret is a configuration error, not an authorization one.
pub struct ReminderKey {
    // prevents construction outside of this module
    _private: (),
}

#[async_trait]
impl<'r> FromRequest<'r> for ReminderKey {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match request.rocket().state::<TriggerConfig>() {
            Some(config) => config,
            None => {
                return Failure((
                    Status::InternalServerError,
                    anyhow!("The trigger configuration is not managed."),
                ))
            }
        };
        let secret = match config.secret.as_ref() {
            Some(secret) => secret,
            None => {
                return Failure((
                    Status::InternalServerError,
                    anyhow!("The reminder trigger secret is not configured."),
                ))
            }
        };
        match request.headers().get_one(REMINDER_KEY_HEADER) {
            Some(provided) if provided == secret.expose_secret() => {
                Success(ReminderKey { _private: () })
            }
            _ => Failure((
                Status::Unauthorized,
                anyhow!("The reminder trigger secret was missing or did not match."),
            )),
        }
    }
}
