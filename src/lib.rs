//! Billboard-to-Spotify Playlist CLI Library
//!
//! This library turns a historical Billboard Hot 100 chart into a Spotify playlist.
//! It scrapes the chart page for a date, refreshes the Spotify access token,
//! creates a playlist and fills it with the best search match for every entry.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `billboard` - Chart page fetching and parsing
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from environment variables
//! - `http` - The HTTP capability every outbound call goes through
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use chartify::{cli, config, http::ReqwestClient};
//!
//! #[tokio::main]
//! async fn main() -> chartify::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env();
//!     let report = cli::run(&ReqwestClient::new(), config, "2020-01-11", true).await?;
//!     println!("{} tracks resolved", report.track_uris.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod billboard;
pub mod cli;
pub mod config;
pub mod http;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so errors
/// can cross await points and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching chart for {}", date);
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
/// success!("Successfully added {} tracks to the playlist.", count);
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
/// Terminates the process with exit code 1 right after printing. Only use it
/// for failures the run cannot recover from.
///
/// # Example
///
/// ```
/// error!("Run aborted: {}", e);
/// // Program exits here
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
/// Used for soft failures that let the run continue, such as a chart entry
/// without a search match.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
