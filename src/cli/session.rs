use crate::{
    cli::{load_session, persist_session},
    info,
    management::REFRESH_AFTER_SECS,
    success, utils, warning,
};

pub async fn status() {
    let session = load_session().await;

    match session.token_pair() {
        Some(token) => {
            let age = token.age(utils::unix_now());
            info!("Authenticated, token issued {}s ago", age);
            if token.is_stale(utils::unix_now()) {
                info!(
                    "Token is older than {}s and will be refreshed on next use",
                    REFRESH_AFTER_SECS
                );
            }
            if token.refresh_token.is_none() {
                warning!("No refresh token stored");
            }
        }
        None => warning!("Not authenticated. Run intune auth"),
    }

    info!("Session keys: {}", session.keys().join(", "));
}

pub async fn logout() {
    let mut session = load_session().await;
    session.clear();
    persist_session(&session).await;
    success!("Logged out.");
}
