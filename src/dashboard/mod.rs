//! # Dashboard Module
//!
//! Turns the two raw top-items pages into everything the dashboard shows:
//! flat artist and track records, optional placeholder padding for a fixed
//! grid, the top genre label and average popularity.
//!
//! ```text
//! TokenManager ─► SpotifyClient::top_items ─► normalize ─► pad ─► GenreSummary
//!                                                               └► track ids (session)
//! ```
//!
//! Placeholder records never contribute to the genre counts, the averages or
//! the remembered track ids.

pub mod genres;
pub mod normalize;

use serde_json::Value;

use crate::{
    Res, debug,
    management::{SessionManager, TokenManager},
    spotify::SpotifyClient,
    types::{ArtistRecord, TimeRange, TrackRecord},
    utils,
};

pub use genres::GenreSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub time_range: TimeRange,
    pub limit: u32,
    /// Fill the grid with placeholders up to `limit`.
    pub pad: bool,
    /// Store the displayed track ids in the session for `playlist`.
    pub remember_tracks: bool,
}

impl DashboardOptions {
    /// Options with `limit` clamped to the range allowed for `pad`.
    pub fn new(time_range: TimeRange, limit: u32, pad: bool) -> Self {
        Self {
            time_range,
            limit: utils::clamp_limit(limit, pad),
            pad,
            remember_tracks: true,
        }
    }

    /// Same options, leaving the remembered track ids untouched.
    pub fn transient(self) -> Self {
        Self {
            remember_tracks: false,
            ..self
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::new(TimeRange::ShortTerm, 10, true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub time_range: TimeRange,
    pub limit: u32,
    pub artists: Vec<ArtistRecord>,
    pub tracks: Vec<TrackRecord>,
    /// Provider-reported totals, independent of the displayed count.
    pub total_artists: u64,
    pub total_tracks: u64,
    /// Number of real (non-placeholder) records.
    pub artist_count: usize,
    pub track_count: usize,
    pub avg_artist_popularity: f64,
    pub avg_track_popularity: f64,
    pub genres: GenreSummary,
}

impl Dashboard {
    /// Builds the dashboard from raw provider pages.
    pub fn from_pages(artists: &Value, tracks: &Value, options: DashboardOptions) -> Res<Self> {
        let (mut artists, total_artists) = normalize::normalize_artists(artists)?;
        let (mut tracks, total_tracks) = normalize::normalize_tracks(tracks)?;

        let limit = options.limit as usize;
        artists.truncate(limit);
        tracks.truncate(limit);

        let artist_count = artists.len();
        let track_count = tracks.len();

        if options.pad {
            normalize::pad_artists(&mut artists, limit);
            normalize::pad_tracks(&mut tracks, limit);
        }

        let genres = GenreSummary::from_artists(&artists);

        let mut dashboard = Self {
            time_range: options.time_range,
            limit: options.limit,
            artists,
            tracks,
            total_artists,
            total_tracks,
            artist_count,
            track_count,
            avg_artist_popularity: 0.0,
            avg_track_popularity: 0.0,
            genres,
        };
        dashboard.avg_artist_popularity =
            average_popularity(dashboard.real_artists().map(|a| a.popularity));
        dashboard.avg_track_popularity =
            average_popularity(dashboard.real_tracks().map(|t| t.popularity));
        Ok(dashboard)
    }

    /// Ids of the displayed real tracks, in display order.
    pub fn track_ids(&self) -> Vec<String> {
        self.real_tracks().map(|t| t.id.clone()).collect()
    }

    pub fn real_artists(&self) -> impl Iterator<Item = &ArtistRecord> {
        self.artists.iter().filter(|a| !a.is_placeholder())
    }

    pub fn real_tracks(&self) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.iter().filter(|t| !t.is_placeholder())
    }
}

/// Loads the dashboard for the user owning `session`.
///
/// Makes sure the access token is fresh (refreshing or clearing the session
/// as [`TokenManager`] decides), fetches both top-items pages and shapes
/// them. Unless the options are [`DashboardOptions::transient`], the real
/// track ids are remembered for a later playlist.
pub async fn load(
    session: &mut SessionManager,
    tokens: &TokenManager,
    api: &SpotifyClient,
    options: DashboardOptions,
) -> Res<Dashboard> {
    let token = tokens.valid_access_token(session).await?;
    let (artists, tracks) = api
        .top_items(&token, options.time_range, options.limit)
        .await?;

    let dashboard = Dashboard::from_pages(&artists, &tracks, options)?;
    debug!(
        "Dashboard ready with {} artists and {} tracks",
        dashboard.artist_count, dashboard.track_count
    );

    if options.remember_tracks {
        session.store_displayed_track_ids(&dashboard.track_ids())?;
    }
    Ok(dashboard)
}

/// Mean popularity rounded to one decimal; 0 for an empty set.
pub fn average_popularity(values: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v as u64, c + 1));
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 10.0).round() / 10.0
}
