mod authenticated_user;
mod reminder_key;

use anyhow::anyhow;
pub use authenticated_user::*;
pub use reminder_key::*;
use rocket::http::Status;

trait OrStatus<T> {
    fn or_status(self, status: Status, context: &'static str)
        -> Result<T, (Status, anyhow::Error)>;
}

impl<T> OrStatus<T> for Option<T> {
    fn or_status(
        self,
        status: Status,
        context: &'static str,
    ) -> Result<T, (Status, anyhow::Error)> {
        self.ok_or_else(|| (status, anyhow!(context)))
    }
}
