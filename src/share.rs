//! Shareable listening summary.
//!
//! Collects what the share image shows: the first five real artists and
//! tracks with display-ready (truncated) text, the provider totals and the
//! artwork links. Drawing the canvas is left to whatever renders the card.

use serde::Serialize;

use crate::{dashboard::Dashboard, spotify::ArtworkFetcher, utils};

pub const SHARE_ITEMS: usize = 5;
pub const FOOTER: &str = "Created with InTune";

const NAME_MAX: usize = 45;
const NAME_KEEP: usize = 42;
const ARTISTS_MAX: usize = 50;
const ARTISTS_KEEP: usize = 47;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub rank: usize,
    pub title: String,
    /// Joined artist names for tracks, `None` for artists.
    pub subtitle: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareCard {
    pub title: String,
    pub total_artists: u64,
    pub total_tracks: u64,
    pub artists: Vec<ShareEntry>,
    pub tracks: Vec<ShareEntry>,
    pub footer: String,
}

impl ShareCard {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        // Placeholders only ever pad the end of the grid, so ranks match grid position.
        let artists = dashboard
            .real_artists()
            .take(SHARE_ITEMS)
            .enumerate()
            .map(|(i, a)| ShareEntry {
                rank: i + 1,
                title: utils::truncate(&a.name, NAME_MAX, NAME_KEEP),
                subtitle: None,
                image: a.image.clone(),
            })
            .collect();

        let tracks = dashboard
            .real_tracks()
            .take(SHARE_ITEMS)
            .enumerate()
            .map(|(i, t)| ShareEntry {
                rank: i + 1,
                title: utils::truncate(&t.name, NAME_MAX, NAME_KEEP),
                subtitle: Some(utils::truncate(
                    &t.artist_names.join(", "),
                    ARTISTS_MAX,
                    ARTISTS_KEEP,
                )),
                image: t.image.clone(),
            })
            .collect();

        Self {
            title: format!("My {} of Listening", dashboard.time_range.period()),
            total_artists: dashboard.total_artists,
            total_tracks: dashboard.total_tracks,
            artists,
            tracks,
            footer: FOOTER.to_string(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ShareEntry> {
        self.artists.iter().chain(self.tracks.iter())
    }
}

/// Artwork bytes for one card entry; `None` when absent or not downloadable.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub url: String,
    pub bytes: Option<Vec<u8>>,
}

/// Downloads the artwork of every entry that has one, in order.
pub async fn fetch_artwork(card: &ShareCard, fetcher: &ArtworkFetcher) -> Vec<Artwork> {
    let mut artwork = Vec::new();
    for url in card.entries().filter_map(|e| e.image.as_deref()) {
        artwork.push(Artwork {
            url: url.to_string(),
            bytes: fetcher.fetch(url).await,
        });
    }
    artwork
}
