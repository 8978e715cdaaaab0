mod push_subscription;
mod savings_entry;
mod session;

pub use push_subscription::*;
pub use savings_entry::*;
pub use session::*;
