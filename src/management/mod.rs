mod auth;
mod session;

pub use auth::REFRESH_AFTER_SECS;
pub use auth::TokenManager;
pub use session::SessionManager;
pub use session::{ACCESS_TOKEN, AUTH_TIME, REFRESH_TOKEN, TRACK_IDS};
