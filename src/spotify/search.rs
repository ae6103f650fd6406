use crate::{
    Res,
    config::Config,
    http::HttpClient,
    spotify::SpotifyError,
    types::SearchResponse,
};

/// Builds the search URL for one title, limited to a single track result.
pub fn search_url(config: &Config, title: &str) -> String {
    format!(
        "{uri}/search?q={query}&type=track&limit=1",
        uri = config.api_url,
        query = urlencoding::encode(title),
    )
}

/// Looks up a song title and returns the URI of the first matching track.
///
/// # Returns
///
/// - `Ok(Some(uri))` - the first search result
/// - `Ok(None)` - the search returned no tracks
///
/// # Errors
///
/// A non-2xx status or a body without `tracks.items` is a [`SpotifyError`].
/// Nothing is retried.
///
/// # Example
///
/// ```
/// match search_track(&http, &config, "Circles").await? {
///     Some(uri) => uris.push(uri),
///     None => warning!("Could not find track for: Circles"),
/// }
/// ```
pub async fn search_track<H: HttpClient>(
    http: &H,
    config: &Config,
    title: &str,
) -> Res<Option<String>> {
    let response = http
        .get_authorized(&search_url(config, title), &config.access_token)
        .await?;

    if !response.is_success() {
        return Err(SpotifyError::Status {
            status: response.status,
            body: response.body,
        }
        .into());
    }

    let result: SearchResponse = serde_json::from_str(&response.body)
        .map_err(|e| SpotifyError::Malformed(format!("search for '{}': {}", title, e)))?;

    Ok(result.tracks.items.into_iter().next().map(|track| track.uri))
}
