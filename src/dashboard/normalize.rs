use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Error, Res,
    types::{ArtistRecord, ItemKind, ProviderArtist, ProviderTrack, TrackRecord},
    utils,
};

/// Maps a top-artists page into display records plus the provider total.
///
/// A page without items yields `([], 0)`. A single malformed item fails the
/// whole page.
pub fn normalize_artists(raw: &Value) -> Res<(Vec<ArtistRecord>, u64)> {
    let Some(items) = page_items::<ProviderArtist>(raw, ItemKind::Artists)? else {
        return Ok((Vec::new(), 0));
    };

    let records = items
        .into_iter()
        .map(|item| ArtistRecord {
            profile_link: utils::rewrite_link(&item.href, ItemKind::Artists),
            image: item.images.into_iter().next().map(|i| i.url),
            id: item.id,
            name: item.name,
            genres: item.genres,
            popularity: popularity(item.popularity),
            followers: item.followers.total,
        })
        .collect();

    Ok((records, page_total(raw)))
}

/// Maps a top-tracks page into display records plus the provider total.
pub fn normalize_tracks(raw: &Value) -> Res<(Vec<TrackRecord>, u64)> {
    let Some(items) = page_items::<ProviderTrack>(raw, ItemKind::Tracks)? else {
        return Ok((Vec::new(), 0));
    };

    let records = items
        .into_iter()
        .map(|item| TrackRecord {
            link: utils::rewrite_link(&item.href, ItemKind::Tracks),
            release_date: utils::format_release_date(&item.album.release_date),
            image: item.album.images.into_iter().next().map(|i| i.url),
            artist_names: item.artists.into_iter().map(|a| a.name).collect(),
            id: item.id,
            name: item.name,
            popularity: popularity(item.popularity),
        })
        .collect();

    Ok((records, page_total(raw)))
}

/// Appends placeholder artists until `records` holds `limit` entries.
pub fn pad_artists(records: &mut Vec<ArtistRecord>, limit: usize) {
    let missing = limit.saturating_sub(records.len());
    records.extend((0..missing).map(ArtistRecord::placeholder));
}

/// Appends placeholder tracks until `records` holds `limit` entries.
pub fn pad_tracks(records: &mut Vec<TrackRecord>, limit: usize) {
    let missing = limit.saturating_sub(records.len());
    records.extend((0..missing).map(TrackRecord::placeholder));
}

fn page_items<T: DeserializeOwned>(raw: &Value, kind: ItemKind) -> Res<Option<Vec<T>>> {
    let items = match raw.get("items") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) if items.is_empty() => return Ok(None),
        Some(items) => items,
    };

    Vec::<T>::deserialize(items)
        .map(Some)
        .map_err(|e| Error::Normalization {
            kind,
            message: e.to_string(),
        })
}

fn page_total(raw: &Value) -> u64 {
    raw.get("total").and_then(Value::as_u64).unwrap_or(0)
}

fn popularity(value: u32) -> u8 {
    value.min(100) as u8
}
