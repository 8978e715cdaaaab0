use crate::guards::OrStatus;
use crate::store::SessionStore;
use anyhow::anyhow;
use rocket::http::Status;
use rocket::outcome::Outcome::{Error as Failure, Success};
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use std::sync::Arc;
use uuid::Uuid;

/// A user resolved from the external session provider.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    // prevents construction outside of this module
    _private: (),
}

#[async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let sessions = try_outcome!(request
            .guard::<&State<Arc<dyn SessionStore>>>()
            .await
            .map_error(|_| (
                Status::InternalServerError,
                anyhow!("The session store is not managed.")
            )));

        let token = match bearer_token(request)
            .or_status(Status::Unauthorized, "No 'Bearer' session token was provided.")
        {
            Ok(token) => token,
            Err(failure) => return Failure(failure),
        };

        match sessions.resolve(token).await {
            Err(error) => Failure((
                Status::InternalServerError,
                error.context("Failed to resolve the session token."),
            )),
            Ok(None) => Failure((
                Status::Unauthorized,
                anyhow!("The session token matched no active session."),
            )),
            Ok(Some(user_id)) => Success(AuthenticatedUser {
                user_id,
                _private: (),
            }),
        }
    }
}

fn bearer_token<'r>(request: &'r Request<'_>) -> Option<&'r str> {
    request
        .headers()
        .get_one("Authorization")?
        .strip_prefix("Bearer ")
}
