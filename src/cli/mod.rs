//! # CLI Module
//!
//! User-facing commands. Each command loads the configuration and the
//! persisted session, calls into the library and reports the outcome with
//! the colored output macros. Failures end the process through `error!`.
//!
//! ## Commands
//!
//! - [`auth`] - Authorization code flow through the browser and the local
//!   callback server, or seeding from a known refresh token
//! - [`dashboard`] - Top artists and tracks, top genres and average popularity
//! - [`playlist`] - Private playlist from the tracks last shown by `dashboard`
//! - [`share`] - Share card summary with optional artwork download
//! - [`status`] / [`logout`] - Inspect or clear the stored session
//!
//! ## Session Handling
//!
//! Every command that talks to the provider goes through
//! [`crate::management::TokenManager`], which refreshes a stale token before
//! use. When authentication fails the session is cleared and persisted, so
//! the next command asks for `intune auth` again.

mod auth;
mod dashboard;
mod playlist;
mod session;
mod share;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, error, management::SessionManager, warning};

pub use auth::auth;
pub use dashboard::dashboard;
pub use playlist::playlist;
pub use session::{logout, status};
pub use share::share;

async fn load_session() -> SessionManager {
    match SessionManager::load().await {
        Ok(session) => session,
        Err(e) => error!("Failed to load session: {}", e),
    }
}

async fn persist_session(session: &SessionManager) {
    if let Err(e) = session.persist().await {
        warning!("Failed to save session: {}", e);
    }
}

/// Clears the stored session when `err` means it can no longer be used.
async fn forget_on_auth_error(session: &mut SessionManager, err: &Error) {
    if session.clear_on_auth_error(err) {
        persist_session(session).await;
    }
}

fn exit_with(err: Error) -> ! {
    if err.is_auth() {
        error!("{}\nPlease run intune auth", err);
    }
    error!("{}", err);
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
