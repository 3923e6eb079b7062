//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API InTune needs. Every
//! request is a single round-trip issued in sequence; nothing here retries,
//! because neither token grants nor playlist creation are idempotent.
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization URL, code exchange and token refresh against the
//!   accounts service (client credentials sent with HTTP Basic auth)
//! - [`top`] - Top artists and top tracks for a time range
//! - [`playlist`] - Current user lookup, playlist creation and track insertion
//! - [`artwork`] - Anonymous artwork download with a short timeout
//!
//! ## API Coverage
//!
//! - `POST /api/token` - `authorization_code` and `refresh_token` grants
//! - `GET /me/top/artists`, `GET /me/top/tracks` - one page, `offset=0`
//! - `GET /me` - current user id
//! - `POST /users/{user_id}/playlists` - create a private playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks in one batch
//!
//! ## Error Types
//!
//! Failures surface as [`crate::Error`] variants naming the step that failed,
//! each carrying an [`crate::Upstream`] with the provider status and body or the
//! transport error.

pub mod artwork;
pub mod auth;
pub mod playlist;
pub mod top;

use reqwest::Client;

use crate::config::Config;

pub use artwork::ArtworkFetcher;
pub use auth::AuthClient;

/// Bearer-authenticated client for the Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_url)
    }

    pub fn with_base_url(api_url: &str) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
