use tabled::Table;

use crate::{
    cli::{exit_with, forget_on_auth_error, load_session, persist_session, spinner},
    config::Config,
    dashboard::{self, Dashboard, DashboardOptions},
    info,
    management::TokenManager,
    spotify::{AuthClient, SpotifyClient},
    types::{ArtistTableRow, TrackTableRow},
    utils,
};

pub async fn dashboard(config: &Config, options: DashboardOptions) {
    let tokens = TokenManager::new(AuthClient::new(config));
    let api = SpotifyClient::new(config);
    let mut session = load_session().await;

    let pb = spinner(&format!("Fetching your top items ({})...", options.time_range));
    let result = dashboard::load(&mut session, &tokens, &api, options).await;
    pb.finish_and_clear();

    let dashboard = match result {
        Ok(d) => d,
        Err(e) => {
            forget_on_auth_error(&mut session, &e).await;
            exit_with(e)
        }
    };
    persist_session(&session).await;

    print_dashboard(&dashboard);
}

fn print_dashboard(dashboard: &Dashboard) {
    let artist_rows: Vec<ArtistTableRow> = dashboard
        .artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", "),
            popularity: a.popularity,
            followers: utils::format_followers(a.followers),
        })
        .collect();

    let track_rows: Vec<TrackTableRow> = dashboard
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: t.artist_names.join(", "),
            released: t.release_date.clone(),
            popularity: t.popularity,
        })
        .collect();

    info!(
        "Top artists ({} of {} total, average popularity {})",
        dashboard.artist_count, dashboard.total_artists, dashboard.avg_artist_popularity
    );
    println!("{}", Table::new(artist_rows));

    info!(
        "Top tracks ({} of {} total, average popularity {})",
        dashboard.track_count, dashboard.total_tracks, dashboard.avg_track_popularity
    );
    println!("{}", Table::new(track_rows));

    info!("{}", dashboard.genres.headline());
}
