//! InTune Listening Dashboard Library
//!
//! This library authenticates against the Spotify Web API with the OAuth 2.0
//! authorization code flow, fetches a user's top artists and tracks, shapes the
//! provider payloads into flat display records and derives the dashboard
//! statistics (top genres, average popularity). It can also turn the displayed
//! tracks into a private playlist and assemble a shareable summary card.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `dashboard` - Response normalization, padding and genre statistics
//! - `error` - Error taxonomy shared by every operation
//! - `management` - Session storage and token freshness policy
//! - `server` - Local HTTP server for OAuth callbacks
//! - `share` - Shareable summary card assembly
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting helpers
//!
//! # Example
//!
//! ```
//! use intune::{config, management::SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> intune::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let session = SessionManager::load().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod management;
pub mod server;
pub mod share;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Upstream};

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the library reports one of the [`Error`]
/// variants, so callers can tell an expired session apart from a failed
/// provider call without inspecting message strings.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching top items for {}", time_range);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist created with {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the CLI layer uses this macro. Library functions return [`Error`]
/// values and leave the decision to terminate to their caller.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, navigate to {} manually", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic line when `INTUNE_DEBUG` is set.
///
/// Used to trace the individual steps of the auth and dashboard pipelines
/// without cluttering normal output.
///
/// # Example
///
/// ```
/// debug!("Refreshing access token (age {}s)", age);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if std::env::var_os("INTUNE_DEBUG").is_some() {
      use colored::Colorize;
      println!("[{}] {}", "~".dimmed(), std::format_args!($($arg)*).to_string().dimmed());
    }
  })
}
