use std::{collections::BTreeMap, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Res, config, types::TokenPair};

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const AUTH_TIME: &str = "auth_time";
pub const TRACK_IDS: &str = "track_ids";

/// Key-value session owned by the caller.
///
/// Holds the token pair and the ids of the tracks last shown on the
/// dashboard. File-backed sessions live in the local data directory;
/// in-memory sessions are never written anywhere.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    path: Option<PathBuf>,
    values: BTreeMap<String, Value>,
}

impl SessionManager {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the session file, starting empty when none exists yet.
    pub async fn load() -> Res<Self> {
        Self::load_from(Self::session_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Res<Self> {
        let values = if path.is_file() {
            let content = async_fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub async fn persist(&self) -> Res<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns the value under `key`, or `None` when absent or of another type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Res<()> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Clears the session when `err` means it can no longer be used.
    /// Returns whether it was cleared.
    pub fn clear_on_auth_error(&mut self, err: &Error) -> bool {
        if err.is_auth() {
            self.clear();
        }
        err.is_auth()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn token_pair(&self) -> Option<TokenPair> {
        Some(TokenPair {
            access_token: self.get(ACCESS_TOKEN)?,
            refresh_token: self.get(REFRESH_TOKEN),
            issued_at: self.get(AUTH_TIME).unwrap_or(0),
        })
    }

    pub fn store_token(&mut self, token: &TokenPair) -> Res<()> {
        self.set(ACCESS_TOKEN, &token.access_token)?;
        match &token.refresh_token {
            Some(refresh) => self.set(REFRESH_TOKEN, refresh)?,
            None => self.remove(REFRESH_TOKEN),
        }
        self.set(AUTH_TIME, token.issued_at)
    }

    /// Replaces the access token after a refresh, keeping the refresh token.
    pub fn update_access_token(&mut self, access_token: &str, issued_at: u64) -> Res<()> {
        self.set(ACCESS_TOKEN, access_token)?;
        self.set(AUTH_TIME, issued_at)
    }

    pub fn displayed_track_ids(&self) -> Vec<String> {
        self.get(TRACK_IDS).unwrap_or_default()
    }

    pub fn store_displayed_track_ids(&mut self, ids: &[String]) -> Res<()> {
        self.set(TRACK_IDS, ids)
    }

    pub fn session_path() -> PathBuf {
        config::data_dir().join("session.json")
    }
}
