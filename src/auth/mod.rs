mod config;
mod extractors;
mod middleware;
pub mod password;
mod session;

pub use config::SessionConfig;
pub use extractors::{AnySession, CustomerSession, RestaurantSession};
pub use middleware::SessionLayer;
pub use session::{removal_cookie, session_cookie, Principal, SessionStore, SESSION_COOKIE};
