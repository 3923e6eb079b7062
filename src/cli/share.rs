use std::path::PathBuf;

use crate::{
    cli::{exit_with, forget_on_auth_error, load_session, persist_session, spinner},
    config::Config,
    dashboard::{self, DashboardOptions},
    error, info,
    management::TokenManager,
    share::{self, SHARE_ITEMS, ShareCard, ShareEntry},
    spotify::{ArtworkFetcher, AuthClient, SpotifyClient},
    success,
    types::TimeRange,
    warning,
};

pub async fn share(config: &Config, time_range: TimeRange, artwork_dir: Option<PathBuf>) {
    let tokens = TokenManager::new(AuthClient::new(config));
    let api = SpotifyClient::new(config);
    let mut session = load_session().await;

    let options = DashboardOptions::new(time_range, SHARE_ITEMS as u32, true).transient();
    let pb = spinner("Fetching your top items...");
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

    let card = ShareCard::from_dashboard(&dashboard);
    print_card(&card);

    if let Some(dir) = artwork_dir {
        save_artwork(&card, dir).await;
    }
}

fn print_card(card: &ShareCard) {
    info!("{}", card.title);
    println!();
    println!("Top Artists{:>30}", format!("{} Total Artists", card.total_artists));
    card.artists.iter().for_each(print_entry);
    println!();
    println!("Top Tracks{:>31}", format!("{} Total Tracks", card.total_tracks));
    card.tracks.iter().for_each(print_entry);
    println!();
    println!("{}", card.footer);
}

fn print_entry(entry: &ShareEntry) {
    println!("  {}. {}", entry.rank, entry.title);
    if let Some(subtitle) = &entry.subtitle {
        println!("     {}", subtitle);
    }
}

async fn save_artwork(card: &ShareCard, dir: PathBuf) {
    let fetcher = match ArtworkFetcher::new() {
        Ok(f) => f,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = async_fs::create_dir_all(&dir).await {
        error!("Cannot create {}: {}", dir.display(), e);
    }

    let pb = spinner("Downloading artwork...");
    let artwork = share::fetch_artwork(card, &fetcher).await;
    pb.finish_and_clear();

    let mut saved = 0;
    for (i, art) in artwork.iter().enumerate() {
        let Some(bytes) = &art.bytes else {
            warning!("No image for {}", art.url);
            continue;
        };
        let path = dir.join(format!("{:02}.jpg", i + 1));
        match async_fs::write(&path, bytes).await {
            Ok(_) => saved += 1,
            Err(e) => warning!("Cannot write {}: {}", path.display(), e),
        }
    }

    success!("Saved {} images to {}", saved, dir.display());
}
