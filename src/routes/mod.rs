#[path = "remind.rs"]
mod remind_route;
mod savings;
mod subscriptions;

pub use remind_route::*;
pub use savings::*;
pub use subscriptions::*;

#[get("/health_check")]
pub async fn health_check() {}

/// Body acknowledging a state-changing request, the way the web client
/// expects it.
#[derive(serde::Serialize)]
pub struct Acknowledged {
    pub success: bool,
}

impl Acknowledged {
    pub fn ok() -> rocket::serde::json::Json<Acknowledged> {
        rocket::serde::json::Json(Acknowledged { success: true })
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
