use crate::challenge;
use crate::guards::AuthenticatedUser;
use crate::models::SavingsEntry;
use crate::routes::Acknowledged;
use crate::store::SavingsLedger;
use chrono::Utc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::sync::Arc;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBody {
    week_number: i32,
    is_saved: bool,
}

#[tracing::instrument(
    name = "Toggling a savings entry",
    skip(body, user, ledger),
    fields(user_id = %user.user_id, week = body.week_number)
)]
#[post("/savings/toggle", data = "<body>")]
pub async fn toggle_saving(
    body: Json<ToggleBody>,
    user: AuthenticatedUser,
    ledger: &State<Arc<dyn SavingsLedger>>,
) -> Result<Json<Acknowledged>, Status> {
    let ToggleBody {
        week_number,
        is_saved,
    } = body.into_inner();
    let amount = match challenge::amount_for_week(week_number) {
        Some(amount) => amount,
        None => return Err(Status::BadRequest),
    };
    if ledger
        .set_saved(user.user_id, week_number, amount, is_saved, Utc::now())
        .await
        .is_err()
    {
        return Err(Status::InternalServerError);
    }
    Ok(Acknowledged::ok())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub entries: Vec<SavingsEntry>,
    pub total_saved: i64,
    pub total_goal: i64,
}

#[tracing::instrument(name = "Loading savings progress", skip(user, ledger), fields(user_id = %user.user_id))]
#[get("/savings/progress")]
pub async fn progress(
    user: AuthenticatedUser,
    ledger: &State<Arc<dyn SavingsLedger>>,
) -> Result<Json<Progress>, Status> {
    let entries = match ledger.entries_for_user(user.user_id).await {
        Ok(entries) => entries,
        Err(_) => return Err(Status::InternalServerError),
    };
    let total_saved = entries
        .iter()
        .filter(|entry| entry.is_saved)
        .map(|entry| entry.amount)
        .sum();
    Ok(Json(Progress {
        entries,
        total_saved,
        total_goal: challenge::TOTAL_GOAL,
    }))
}
