use chrono::{NaiveDate, Utc};
use rand::{Rng, distr::Alphanumeric};

use crate::types::ItemKind;

const API_ARTISTS_PREFIX: &str = "https://api.spotify.com/v1/artists";
const API_TRACKS_PREFIX: &str = "https://api.spotify.com/v1/tracks";
const WEB_ARTIST_PREFIX: &str = "https://open.spotify.com/artist";
const WEB_TRACK_PREFIX: &str = "https://open.spotify.com/track";

pub const MIN_LIMIT: u32 = 1;
pub const MIN_PADDED_LIMIT: u32 = 5;
pub const MAX_LIMIT: u32 = 50;

/// Outcome of normalizing a provider release date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseDate {
    /// Parsed and rendered as `M/D/YYYY`.
    Parsed(String),
    /// Not a recognised date; the input is kept as is.
    Unchanged(String),
}

impl ReleaseDate {
    pub fn as_str(&self) -> &str {
        match self {
            ReleaseDate::Parsed(s) | ReleaseDate::Unchanged(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            ReleaseDate::Parsed(s) | ReleaseDate::Unchanged(s) => s,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ReleaseDate::Parsed(_))
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM` or `YYYY` into `M/D/YYYY`.
///
/// Missing month and day default to 1. Anything that is not a real calendar
/// date comes back as [`ReleaseDate::Unchanged`].
pub fn parse_release_date(input: &str) -> ReleaseDate {
    let unchanged = || ReleaseDate::Unchanged(input.to_string());

    let parts: Vec<&str> = input.split('-').collect();
    let (year, month, day) = match parts.as_slice() {
        [y] => (*y, "1", "1"),
        [y, m] => (*y, *m, "1"),
        [y, m, d] => (*y, *m, *d),
        _ => return unchanged(),
    };

    if year.len() != 4 || !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return unchanged();
    }

    let (Ok(y), Ok(m), Ok(d)) = (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return unchanged();
    };

    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(_) => ReleaseDate::Parsed(format!("{}/{}/{}", m, d, year)),
        None => unchanged(),
    }
}

pub fn format_release_date(input: &str) -> String {
    parse_release_date(input).into_string()
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Turns a canonical API href into the public web link for the same item.
pub fn rewrite_link(href: &str, kind: ItemKind) -> String {
    match kind {
        ItemKind::Artists => href.replace(API_ARTISTS_PREFIX, WEB_ARTIST_PREFIX),
        ItemKind::Tracks => href.replace(API_TRACKS_PREFIX, WEB_TRACK_PREFIX),
    }
}

/// Formats a follower count with `,` thousands separators.
pub fn format_followers(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Clamps a requested result limit to what the provider accepts.
///
/// A padded grid needs at least five slots.
pub fn clamp_limit(limit: u32, pad: bool) -> u32 {
    let min = if pad { MIN_PADDED_LIMIT } else { MIN_LIMIT };
    limit.clamp(min, MAX_LIMIT)
}

/// Shortens `text` to `keep` characters plus `...` when it exceeds `max`.
pub fn truncate(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() > max {
        let mut short: String = text.chars().take(keep).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
