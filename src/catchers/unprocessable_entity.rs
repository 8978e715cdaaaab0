use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::Request;

// Rocket answers 422 when a JSON body does not deserialize; the API treats a
// malformed payload as a plain validation failure.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(_req: &Request) -> BadRequest<()> {
    status::BadRequest::<()>(())
}
