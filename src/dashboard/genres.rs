use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::ArtistRecord;

pub const NO_GENRES_MESSAGE: &str = "No genres found";

/// Interprets a provider `genres` value as a list of genre names.
///
/// Accepts a JSON array of strings, or text that holds a serialized list
/// (`["rock", "pop"]` or `['rock', 'pop']`). Anything else, including arrays
/// with non-string members, yields an empty list.
pub fn parse_genre_field(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => strings_only(items),
        Value::String(text) => parse_genre_text(text),
        _ => Vec::new(),
    }
}

fn parse_genre_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if !trimmed.starts_with('[') {
        return Vec::new();
    }

    let parsed = serde_json::from_str::<Value>(trimmed)
        .or_else(|_| serde_json::from_str::<Value>(&trimmed.replace('\'', "\"")));

    match parsed {
        Ok(Value::Array(items)) => strings_only(&items),
        _ => Vec::new(),
    }
}

fn strings_only(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// `deserialize_with` adapter used by the provider artist payload.
pub fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_genre_field(&value))
}

/// Occurrences of every genre across the real (non-placeholder) artists.
pub fn count_genres(artists: &[ArtistRecord]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for genre in artists
        .iter()
        .filter(|a| !a.is_placeholder())
        .flat_map(|a| a.genres.iter())
    {
        *counts.entry(genre.clone()).or_insert(0) += 1;
    }
    counts
}

/// The genre(s) sharing the highest count, sorted ascending.
pub fn top_genres(counts: &HashMap<String, usize>) -> Vec<String> {
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };

    let mut top: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(genre, _)| genre.clone())
        .collect();
    top.sort();
    top
}

/// Joins genres as `a`, `a and b`, or `a, b, and c`.
pub fn join_genres(genres: &[String]) -> String {
    match genres {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Dashboard label for the user's dominant genre(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSummary {
    pub top_genres: Vec<String>,
    /// Number of artists carrying each of the top genres.
    pub count: usize,
    /// Joined genre names; empty when no genre data exists.
    pub label: String,
}

impl GenreSummary {
    pub fn from_artists(artists: &[ArtistRecord]) -> Self {
        let counts = count_genres(artists);
        let top_genres = top_genres(&counts);
        let count = top_genres
            .first()
            .and_then(|g| counts.get(g))
            .copied()
            .unwrap_or(0);
        let label = join_genres(&top_genres);

        Self {
            top_genres,
            count,
            label,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top_genres.is_empty()
    }

    pub fn phrase(&self) -> &'static str {
        if self.top_genres.len() > 1 {
            "Your top genres are"
        } else {
            "Your top genre is"
        }
    }

    /// Full sentence for display, or the "no genres" message.
    pub fn headline(&self) -> String {
        if self.is_empty() {
            NO_GENRES_MESSAGE.to_string()
        } else {
            format!("{} {}", self.phrase(), self.label)
        }
    }
}
