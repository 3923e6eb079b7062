//! Configuration management for InTune.
//!
//! Configuration is read from environment variables, optionally seeded from a
//! `.env` file in the local data directory. Only the Spotify client
//! credentials are mandatory; every endpoint has a default pointing at the
//! public Spotify services and can be overridden (tests point them at a local
//! mock server).
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Res, debug};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-top-read playlist-modify-public playlist-modify-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `intune/.env` in the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/intune/.env`
/// - macOS: `~/Library/Application Support/intune/.env`
/// - Windows: `%LOCALAPPDATA%/intune/.env`
///
/// A missing file is not an error; variables may come from the process
/// environment alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if !path.is_file() {
        debug!("No .env file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    Ok(())
}

/// Directory holding the `.env` file and the persisted session.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("intune");
    path
}

/// Runtime configuration for the Spotify clients and the callback server.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_address: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET` must be
    /// set. The redirect URI defaults to `/callback` on the server address.
    pub fn from_env() -> Res<Self> {
        let client_id = required("SPOTIFY_API_AUTH_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_API_AUTH_CLIENT_SECRET")?;
        let server_address = optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let redirect_uri = env::var("SPOTIFY_API_REDIRECT_URI")
            .unwrap_or_else(|_| format!("http://{}/callback", server_address));

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_address,
        })
    }
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", name))),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
