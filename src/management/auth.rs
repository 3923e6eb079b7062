use crate::{
    Error, Res, debug, management::SessionManager, spotify::AuthClient, types::TokenPair, utils,
};

/// Seconds after which an access token is refreshed before use. The provider
/// declares a 3600 s lifetime.
pub const REFRESH_AFTER_SECS: u64 = 3000;

impl TokenPair {
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.issued_at)
    }

    pub fn is_stale(&self, now: u64) -> bool {
        self.age(now) > REFRESH_AFTER_SECS
    }
}

/// Applies the token freshness policy to a session.
pub struct TokenManager {
    auth: AuthClient,
}

impl TokenManager {
    pub fn new(auth: AuthClient) -> Self {
        TokenManager { auth }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Returns an access token that is safe to use right now.
    ///
    /// A stale token with a refresh token is refreshed first and the session
    /// updated. If the refresh fails the whole session is cleared and
    /// [`Error::AuthRefresh`] is returned; there is no retry.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] when the session holds no token.
    pub async fn valid_access_token(&self, session: &mut SessionManager) -> Res<String> {
        self.valid_access_token_at(session, utils::unix_now()).await
    }

    pub async fn valid_access_token_at(
        &self,
        session: &mut SessionManager,
        now: u64,
    ) -> Res<String> {
        let Some(token) = session.token_pair() else {
            return Err(Error::NotAuthenticated);
        };

        let refresh_token = match &token.refresh_token {
            Some(refresh) if token.is_stale(now) => refresh,
            _ => return Ok(token.access_token),
        };

        debug!("Access token is {}s old, refreshing", token.age(now));
        match self.auth.refresh(refresh_token).await {
            Ok(access_token) => {
                session.update_access_token(&access_token, now)?;
                Ok(access_token)
            }
            Err(e) => {
                session.clear();
                Err(e)
            }
        }
    }

    /// Starts a session from a known refresh token.
    pub async fn seed_from_refresh_token(
        &self,
        session: &mut SessionManager,
        refresh_token: &str,
    ) -> Res<TokenPair> {
        let access_token = self.auth.refresh(refresh_token).await?;
        let token = TokenPair {
            access_token,
            refresh_token: Some(refresh_token.to_string()),
            issued_at: utils::unix_now(),
        };
        session.store_token(&token)?;
        Ok(token)
    }
}
