use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct AuthState {
    pub state: String,
    pub token: Option<Token>,
}

#[derive(Tabled)]
pub struct ChartTableRow {
    pub rank: usize,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: Option<String>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Result of the single append request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Nothing matched, so no request was sent.
    Skipped,
    /// Spotify answered 201 for this many tracks.
    Added(usize),
    /// Spotify answered with this status instead of 201.
    Rejected(u16),
}

impl fmt::Display for AppendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendOutcome::Skipped => write!(f, "No tracks to add."),
            AppendOutcome::Added(count) => {
                write!(f, "Successfully added {} tracks to the playlist.", count)
            }
            AppendOutcome::Rejected(status) => write!(f, "Failed to add tracks. Error: {}", status),
        }
    }
}
