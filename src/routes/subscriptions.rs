use crate::guards::AuthenticatedUser;
use crate::models::NewPushSubscription;
use crate::routes::Acknowledged;
use crate::store::SubscriptionStore;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct SubscribeBody {
    subscription: SubscriptionPayload,
}

#[derive(serde::Deserialize)]
pub struct SubscriptionPayload {
    endpoint: String,
    keys: SubscriptionKeys,
}

#[derive(serde::Deserialize)]
pub struct SubscriptionKeys {
    auth: String,
    p256dh: String,
}

impl TryFrom<SubscribeBody> for NewPushSubscription {
    type Error = String;

    fn try_from(body: SubscribeBody) -> Result<Self, Self::Error> {
        let SubscriptionPayload { endpoint, keys } = body.subscription;
        if endpoint.is_empty() || keys.auth.is_empty() || keys.p256dh.is_empty() {
            return Err("Invalid subscription payload".to_string());
        }
        Ok(NewPushSubscription {
            endpoint,
            auth: keys.auth,
            p256dh: keys.p256dh,
        })
    }
}

#[tracing::instrument(
    name = "Registering a push subscription",
    skip(body, user, store),
    fields(user_id = %user.user_id)
)]
#[post("/notifications/subscribe", data = "<body>")]
pub async fn subscribe(
    body: Json<SubscribeBody>,
    user: AuthenticatedUser,
    store: &State<Arc<dyn SubscriptionStore>>,
) -> Result<Json<Acknowledged>, Status> {
    let new_subscription: NewPushSubscription = match body.into_inner().try_into() {
        Ok(subscription) => subscription,
        Err(_) => return Err(Status::BadRequest),
    };
    if store.upsert(user.user_id, &new_subscription).await.is_err() {
        return Err(Status::InternalServerError);
    }
    Ok(Acknowledged::ok())
}

#[derive(serde::Deserialize)]
pub struct UnsubscribeBody {
    endpoint: String,
}

#[tracing::instrument(
    name = "Removing a push subscription",
    skip(body, user, store),
    fields(user_id = %user.user_id)
)]
#[delete("/notifications/subscribe", data = "<body>")]
pub async fn unsubscribe(
    body: Json<UnsubscribeBody>,
    user: AuthenticatedUser,
    store: &State<Arc<dyn SubscriptionStore>>,
) -> Result<Json<Acknowledged>, Status> {
    let endpoint = body.into_inner().endpoint;
    if endpoint.is_empty() {
        return Err(Status::BadRequest);
    }
    if store
        .delete_for_user(user.user_id, &endpoint)
        .await
        .is_err()
    {
        return Err(Status::InternalServerError);
    }
    Ok(Acknowledged::ok())
}
