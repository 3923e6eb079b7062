use crate::{
    cli::{exit_with, forget_on_auth_error, load_session, persist_session, spinner},
    config::Config,
    info,
    management::TokenManager,
    spotify::{AuthClient, SpotifyClient},
    success, warning,
};

pub async fn playlist(config: &Config, name: String) {
    let name = name.trim().to_string();
    if name.is_empty() {
        warning!("Please enter a playlist name.");
        return;
    }

    let tokens = TokenManager::new(AuthClient::new(config));
    let api = SpotifyClient::new(config);
    let mut session = load_session().await;

    let track_ids = session.displayed_track_ids();
    if track_ids.is_empty() {
        warning!("No displayed tracks remembered. Run intune dashboard first.");
        return;
    }

    let token = match tokens.valid_access_token(&mut session).await {
        Ok(token) => token,
        Err(e) => {
            forget_on_auth_error(&mut session, &e).await;
            exit_with(e)
        }
    };
    persist_session(&session).await;

    info!("Creating playlist {}", name);
    let pb = spinner("Creating playlist...");
    let result = api.create_playlist(&token, &name, &track_ids).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => {
            success!(
                "\"{}\" has been created with {} tracks!",
                playlist.name,
                playlist.tracks_added
            );
            info!("{}", playlist.url);
        }
        Err(e) => {
            forget_on_auth_error(&mut session, &e).await;
            exit_with(e)
        }
    }
}
