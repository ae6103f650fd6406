use reqwest::StatusCode;

use crate::{
    Res,
    config::Config,
    http::HttpClient,
    spotify::SpotifyError,
    types::{
        AddTrackToPlaylistRequest, AppendOutcome, CreatePlaylistRequest, CreatePlaylistResponse,
        CreatedPlaylist,
    },
};

/// Creates a playlist owned by the configured user.
///
/// The id and share URL are taken from the response as-is. Either may be
/// missing, for instance when Spotify answers with an error object, and the
/// caller decides whether the run can go on.
///
/// # Arguments
///
/// * `http` - Client to send the request through
/// * `config` - Provides the user id, API base URL and access token
/// * `name` - Display name of the new playlist
/// * `description` - Playlist description
/// * `public` - Whether the playlist is visible on the user's profile
///
/// # Errors
///
/// Returns an error when the request fails at the transport level or the body
/// is not JSON.
pub async fn create<H: HttpClient>(
    http: &H,
    config: &Config,
    name: String,
    description: String,
    public: bool,
) -> Res<CreatedPlaylist> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config.api_url,
        user_id = config.user_id
    );

    let request = CreatePlaylistRequest {
        name,
        description,
        public,
    };

    let response = http
        .post_json(&api_url, &config.access_token, &serde_json::to_value(&request)?)
        .await?;

    let created: CreatePlaylistResponse = serde_json::from_str(&response.body)
        .map_err(|e| SpotifyError::Malformed(format!("create playlist: {}", e)))?;

    Ok(CreatedPlaylist {
        id: created.id,
        name: request.name,
        description: request.description,
        public: request.public,
        external_url: created.external_urls.and_then(|urls| urls.spotify),
    })
}

/// Adds all URIs to the playlist in a single request.
///
/// An empty list sends nothing and returns [`AppendOutcome::Skipped`]. Only
/// `201 Created` counts as success, any other status is returned as
/// [`AppendOutcome::Rejected`] without a retry.
pub async fn add_tracks<H: HttpClient>(
    http: &H,
    config: &Config,
    playlist_id: &str,
    uris: Vec<String>,
) -> Res<AppendOutcome> {
    if uris.is_empty() {
        return Ok(AppendOutcome::Skipped);
    }

    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = config.api_url,
        playlist_id = playlist_id
    );

    let count = uris.len();
    let request = AddTrackToPlaylistRequest { uris };

    let response = http
        .post_json(&api_url, &config.access_token, &serde_json::to_value(&request)?)
        .await?;

    if response.status == StatusCode::CREATED.as_u16() {
        Ok(AppendOutcome::Added(count))
    } else {
        Ok(AppendOutcome::Rejected(response.status))
    }
}
