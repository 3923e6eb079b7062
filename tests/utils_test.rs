use intune::types::ItemKind;
use intune::utils::*;

#[test]
fn test_format_release_date_full_date() {
    assert_eq!(format_release_date("2021-03-05"), "3/5/2021");
    assert_eq!(format_release_date("1999-12-31"), "12/31/1999");
}

#[test]
fn test_format_release_date_month_precision() {
    // Missing day defaults to the first
    assert_eq!(format_release_date("2021-03"), "3/1/2021");
}

#[test]
fn test_format_release_date_year_precision() {
    assert_eq!(format_release_date("2021"), "1/1/2021");
}

#[test]
fn test_format_release_date_falls_back_to_input() {
    assert_eq!(format_release_date("not-a-date"), "not-a-date");
    assert_eq!(format_release_date(""), "");
    assert_eq!(format_release_date("2021-13-01"), "2021-13-01");
    assert_eq!(format_release_date("2021-02-30"), "2021-02-30");
    assert_eq!(format_release_date("2021-03-05-01"), "2021-03-05-01");
    assert_eq!(format_release_date("21-03-05"), "21-03-05");
}

#[test]
fn test_parse_release_date_is_tagged() {
    let parsed = parse_release_date("2020-07-14");
    assert!(parsed.is_parsed());
    assert_eq!(parsed, ReleaseDate::Parsed("7/14/2020".to_string()));

    let unchanged = parse_release_date("soon");
    assert!(!unchanged.is_parsed());
    assert_eq!(unchanged.as_str(), "soon");
}

#[test]
fn test_rewrite_link_tracks() {
    assert_eq!(
        rewrite_link("https://api.spotify.com/v1/tracks/abc", ItemKind::Tracks),
        "https://open.spotify.com/track/abc"
    );
}

#[test]
fn test_rewrite_link_artists() {
    assert_eq!(
        rewrite_link("https://api.spotify.com/v1/artists/xyz", ItemKind::Artists),
        "https://open.spotify.com/artist/xyz"
    );
}

#[test]
fn test_rewrite_link_leaves_other_hosts_alone() {
    let href = "https://example.com/v1/tracks/abc";
    assert_eq!(rewrite_link(href, ItemKind::Tracks), href);
}

#[test]
fn test_format_followers() {
    assert_eq!(format_followers(0), "0");
    assert_eq!(format_followers(999), "999");
    assert_eq!(format_followers(1000), "1,000");
    assert_eq!(format_followers(1234567), "1,234,567");
    assert_eq!(format_followers(100000), "100,000");
}

#[test]
fn test_clamp_limit() {
    assert_eq!(clamp_limit(0, false), 1);
    assert_eq!(clamp_limit(0, true), 5);
    assert_eq!(clamp_limit(3, true), 5);
    assert_eq!(clamp_limit(3, false), 3);
    assert_eq!(clamp_limit(10, true), 10);
    assert_eq!(clamp_limit(500, true), 50);
    assert_eq!(clamp_limit(500, false), 50);
}

#[test]
fn test_truncate() {
    let long = "a".repeat(46);
    let short = truncate(&long, 45, 42);
    assert_eq!(short.chars().count(), 45);
    assert!(short.ends_with("..."));

    let exact = "b".repeat(45);
    assert_eq!(truncate(&exact, 45, 42), exact);
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}
