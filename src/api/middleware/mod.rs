//! API middleware.

mod gate;
mod session;

pub use gate::page_gate;
pub use session::{session_cookie, session_cookie_removal, session_middleware, CurrentSession};
