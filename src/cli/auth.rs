use crate::{
    cli::{load_session, persist_session},
    config::Config,
    error, info,
    management::TokenManager,
    server::{CALLBACK_TIMEOUT, CallbackServer},
    spotify::AuthClient,
    success, utils, warning,
};

pub async fn auth(config: &Config, refresh_token: Option<String>) {
    let tokens = TokenManager::new(AuthClient::new(config));
    let mut session = load_session().await;

    if let Some(refresh_token) = refresh_token {
        session.clear();
        if let Err(e) = tokens
            .seed_from_refresh_token(&mut session, &refresh_token)
            .await
        {
            error!("Failed to start session from refresh token: {}", e);
        }
        persist_session(&session).await;
        success!("Authentication successful!");
        return;
    }

    let state = utils::generate_state();
    let server = match CallbackServer::start(&config.server_address, Some(state.clone())).await {
        Ok(server) => server,
        Err(e) => error!("Failed to start callback server: {}", e),
    };

    let auth_url = match tokens.auth().authorization_url_with_state(&state) {
        Ok(url) => url,
        Err(e) => error!("{}", e),
    };

    info!("Waiting for authorization in your browser...");
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let code = match server.wait_for_code(CALLBACK_TIMEOUT).await {
        Ok(code) => code,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let token = match tokens.auth().exchange_code(&code).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    session.clear();
    if let Err(e) = session.store_token(&token) {
        error!("Failed to store token: {}", e);
    }
    persist_session(&session).await;

    success!("Authentication successful!");
}
