//! # Spotify Integration Module
//!
//! This module wraps the handful of Spotify Web API endpoints chartify needs.
//! Every function takes the [`HttpClient`](crate::http::HttpClient) to send
//! through, so the same code runs against the real API and against fixtures.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (playlist pipeline, auth command)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (refresh, authorization code exchange)
//!     ├── Search (title → track URI)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! HttpClient (reqwest in production)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Token refresh and authorization code exchange
//! - `GET /search` - Track lookup, one result per query
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks in a single batch
//!
//! ## Error Handling
//!
//! There are no retries. Transport failures surface as the boxed error from
//! the HTTP layer. Responses that cannot be used become a [`SpotifyError`].
//! Soft outcomes such as "no search match" or "append rejected" are regular
//! return values so the caller can report them and move on.

use std::fmt;

pub mod auth;
pub mod playlist;
pub mod search;

/// A response the Spotify integration could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotifyError {
    /// The endpoint answered with a status the caller cannot continue from.
    Status { status: u16, body: String },
    /// The body did not have the expected shape.
    Malformed(String),
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::Status { status, body } => {
                write!(f, "Spotify responded with status {}: {}", status, body)
            }
            SpotifyError::Malformed(reason) => write!(f, "Malformed Spotify response: {}", reason),
        }
    }
}

impl std::error::Error for SpotifyError {}
