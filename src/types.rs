use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Prefix shared by every synthetic record id used to pad a display grid.
pub const PLACEHOLDER_PREFIX: &str = "placeholder";

pub const PLACEHOLDER_NAME: &str = "No Data Available";

/// Access/refresh token pair as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) at which `access_token` was issued.
    pub issued_at: u64,
}

/// Provider-defined window for top-items queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last four weeks
    #[default]
    #[value(name = "short", alias = "short_term")]
    ShortTerm,
    /// Roughly the last six months
    #[value(name = "medium", alias = "medium_term")]
    MediumTerm,
    /// Roughly the last year
    #[value(name = "long", alias = "long_term")]
    LongTerm,
}

impl TimeRange {
    /// Value of the `time_range` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn period(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last Month",
            TimeRange::MediumTerm => "Last 6 Months",
            TimeRange::LongTerm => "Last Year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Which of the two top-items collections an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Artists,
    Tracks,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Artists => "artists",
            ItemKind::Tracks => "tracks",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u8,
    pub followers: u64,
    pub profile_link: String,
    pub image: Option<String>,
}

impl ArtistRecord {
    pub fn placeholder(index: usize) -> Self {
        Self {
            id: format!("{}-artist-{}", PLACEHOLDER_PREFIX, index),
            name: PLACEHOLDER_NAME.to_string(),
            genres: Vec::new(),
            popularity: 0,
            followers: 0,
            profile_link: "#".to_string(),
            image: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artist_names: Vec<String>,
    pub release_date: String,
    pub popularity: u8,
    pub link: String,
    pub image: Option<String>,
}

impl TrackRecord {
    pub fn placeholder(index: usize) -> Self {
        Self {
            id: format!("{}-track-{}", PLACEHOLDER_PREFIX, index),
            name: PLACEHOLDER_NAME.to_string(),
            artist_names: Vec::new(),
            release_date: String::new(),
            popularity: 0,
            link: "#".to_string(),
            image: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder_id(&self.id)
    }
}

pub fn is_placeholder_id(id: &str) -> bool {
    id.starts_with(PLACEHOLDER_PREFIX)
}

// Provider payloads. Only the fields the normalizer reads are declared; a
// missing required field fails deserialization of the whole page.

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderFollowers {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderArtist {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "crate::dashboard::genres::deserialize_genres")]
    pub genres: Vec<String>,
    pub popularity: u32,
    pub followers: ProviderFollowers,
    pub href: String,
    #[serde(default)]
    pub images: Vec<ProviderImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderAlbum {
    pub release_date: String,
    #[serde(default)]
    pub images: Vec<ProviderImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<ProviderArtistRef>,
    pub album: ProviderAlbum,
    pub popularity: u32,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Result of a successful playlist creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    pub tracks_added: usize,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub genres: String,
    pub popularity: u8,
    pub followers: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub released: String,
    pub popularity: u8,
}
