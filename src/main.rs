use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use intune::{
    cli,
    config::{self, Config},
    dashboard::DashboardOptions,
    error,
    types::TimeRange,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Show your top artists, tracks and genres
    Dashboard(DashboardArgs),

    /// Create a private playlist from the tracks last shown by `dashboard`
    Playlist(PlaylistOptions),

    /// Print a shareable summary of your listening
    Share(ShareOptions),

    /// Show the stored session
    Session,

    /// Forget the stored session
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Start the session from a known refresh token instead of the browser flow
    #[clap(long)]
    pub refresh_token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DashboardArgs {
    /// Time window of the statistics
    #[clap(long, value_enum, default_value_t = TimeRange::ShortTerm)]
    pub time_range: TimeRange,

    /// Number of artists and tracks to show
    #[clap(long, default_value_t = 10)]
    pub limit: u32,

    /// Do not fill missing grid slots with placeholders
    #[clap(long)]
    pub no_pad: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Name of the new playlist
    #[clap(long)]
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ShareOptions {
    #[clap(long, value_enum, default_value_t = TimeRange::ShortTerm)]
    pub time_range: TimeRange,

    /// Directory to save the downloaded artwork to
    #[clap(long)]
    pub artwork_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => cli::auth(&load_config(), opt.refresh_token).await,
        Command::Dashboard(opt) => {
            let options = DashboardOptions::new(opt.time_range, opt.limit, !opt.no_pad);
            cli::dashboard(&load_config(), options).await
        }
        Command::Playlist(opt) => cli::playlist(&load_config(), opt.name).await,
        Command::Share(opt) => cli::share(&load_config(), opt.time_range, opt.artwork_dir).await,
        Command::Session => cli::status().await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}
