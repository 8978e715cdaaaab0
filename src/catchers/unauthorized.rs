use rocket::serde::json::{json, Value};

// Guard failures carry no body of their own; the web client expects the
// error as JSON.
#[catch(401)]
pub fn unauthorized_as_json() -> Value {
    json!({ "error": "Unauthorized" })
}
