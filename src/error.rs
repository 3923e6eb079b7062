use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ItemKind;

/// Why a single provider round-trip failed.
#[derive(Debug, Error)]
pub enum Upstream {
    #[error("provider responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Upstream {
    /// Consumes a non-success response and keeps its status and body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Upstream::Status { status, body }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Upstream::Status { status, .. } => Some(*status),
            Upstream::Transport(e) => e.status(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to exchange authorization code: {0}")]
    AuthExchange(#[source] Upstream),

    #[error("failed to refresh access token: {0}")]
    AuthRefresh(#[source] Upstream),

    #[error("failed to get your top {kind}: {source}")]
    Fetch {
        kind: ItemKind,
        #[source]
        source: Upstream,
    },

    #[error("malformed {kind} data: {message}")]
    Normalization { kind: ItemKind, message: String },

    #[error("no valid tracks found for playlist creation")]
    NoValidTracks,

    #[error("failed to get user profile: {0}")]
    UserProfile(#[source] Upstream),

    #[error("failed to create playlist: {0}")]
    PlaylistCreate(#[source] Upstream),

    #[error("failed to add tracks to playlist {playlist_id}: {source}")]
    TrackAdd {
        playlist_id: String,
        #[source]
        source: Upstream,
    },

    #[error("not authenticated, run `intune auth` first")]
    NotAuthenticated,

    #[error("authorization callback failed: {0}")]
    Callback(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors after which the stored session can no longer be trusted.
    ///
    /// Besides the token grant failures this covers any provider call that
    /// answered `401 Unauthorized`, e.g. a revoked access token.
    pub fn is_auth(&self) -> bool {
        match self {
            Error::AuthExchange(_) | Error::AuthRefresh(_) | Error::NotAuthenticated => true,
            _ => self.upstream().and_then(Upstream::status) == Some(StatusCode::UNAUTHORIZED),
        }
    }

    /// Provider failure detail, for the variants that carry one.
    pub fn upstream(&self) -> Option<&Upstream> {
        match self {
            Error::AuthExchange(u)
            | Error::AuthRefresh(u)
            | Error::UserProfile(u)
            | Error::PlaylistCreate(u)
            | Error::Fetch { source: u, .. }
            | Error::TrackAdd { source: u, .. } => Some(u),
            _ => None,
        }
    }
}
