use reqwest::{Client, StatusCode, Url};

use crate::{
    Error, Res, Upstream,
    config::Config,
    debug,
    types::{TokenPair, TokenResponse},
    utils,
};

/// Client for the accounts service: builds the authorize URL and performs
/// both token grants with the application's client credentials.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    auth_url: String,
    token_url: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// Authorize endpoint the user's browser is sent to.
    ///
    /// Carries the client id, redirect URI, requested scopes and
    /// `response_type=code`.
    pub fn authorization_url(&self) -> Res<Url> {
        self.build_authorization_url(None)
    }

    /// Same as [`AuthClient::authorization_url`] with an anti-forgery `state`
    /// value the callback must echo back.
    pub fn authorization_url_with_state(&self, state: &str) -> Res<Url> {
        self.build_authorization_url(Some(state))
    }

    fn build_authorization_url(&self, state: Option<&str>) -> Res<Url> {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", self.scope.as_str()),
        ];
        if let Some(state) = state {
            params.push(("state", state));
        }

        Url::parse_with_params(&self.auth_url, &params)
            .map_err(|e| Error::Config(format!("invalid authorize URL {}: {}", self.auth_url, e)))
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// [`Error::AuthExchange`] when the provider answers with anything but
    /// `200 OK`, carrying its status and body.
    pub async fn exchange_code(&self, code: &str) -> Res<TokenPair> {
        debug!("Exchanging authorization code for access token");
        let token = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await
            .map_err(Error::AuthExchange)?;

        Ok(TokenPair {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            issued_at: utils::unix_now(),
        })
    }

    /// Trades a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// [`Error::AuthRefresh`] on any non-`200` answer. A failed refresh is
    /// terminal for the session; callers must not retry.
    pub async fn refresh(&self, refresh_token: &str) -> Res<String> {
        debug!("Refreshing access token");
        let token = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await
            .map_err(Error::AuthRefresh)?;

        Ok(token.access_token)
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse, Upstream> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Upstream::from_response(response).await);
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}
