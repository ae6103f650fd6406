use std::{error::Error, fmt, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    billboard,
    config::Config,
    error,
    http::{HttpClient, ReqwestClient},
    info,
    spotify::{self, auth::refresh_access_token, search::search_track},
    success,
    types::{AppendOutcome, CreatedPlaylist},
    utils, warning,
};

/// Progress of a run, in the order the steps happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    TokenRefreshed,
    ChartFetched,
    PlaylistCreated,
    TracksResolved,
    TracksAppended,
    Done,
}

impl RunState {
    /// The state that follows this one. `Done` stays `Done`.
    pub fn next(self) -> RunState {
        match self {
            RunState::Idle => RunState::TokenRefreshed,
            RunState::TokenRefreshed => RunState::ChartFetched,
            RunState::ChartFetched => RunState::PlaylistCreated,
            RunState::PlaylistCreated => RunState::TracksResolved,
            RunState::TracksResolved => RunState::TracksAppended,
            RunState::TracksAppended | RunState::Done => RunState::Done,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::TokenRefreshed => "token refreshed",
            RunState::ChartFetched => "chart fetched",
            RunState::PlaylistCreated => "playlist created",
            RunState::TracksResolved => "tracks resolved",
            RunState::TracksAppended => "tracks appended",
            RunState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a run stopped before reaching [`RunState::Done`].
#[derive(Debug)]
pub enum PipelineError {
    /// The playlist was created without an id, so tracks have nowhere to go.
    MissingPlaylistId,
    /// A step failed after the run reached `after`.
    Step {
        after: RunState,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::MissingPlaylistId => {
                write!(f, "Spotify did not return an id for the new playlist")
            }
            PipelineError::Step { after, source } => {
                write!(f, "run failed after '{}': {}", after, source)
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::MissingPlaylistId => None,
            PipelineError::Step { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    pub chart_url: String,
    pub titles: Vec<String>,
    pub playlist: CreatedPlaylist,
    pub track_uris: Vec<String>,
    pub unmatched: Vec<String>,
    pub append: AppendOutcome,
    /// Every state the run moved into, in order.
    pub reached: Vec<RunState>,
}

/// Moves the run to its next state and reports it.
fn advance(state: &mut RunState, reached: &mut Vec<RunState>) {
    *state = state.next();
    info!("State: {}", state);
    reached.push(*state);
}

/// Runs the full chart-to-playlist pipeline for `date`.
///
/// The steps run one after another, each awaiting the previous one:
/// 1. Refresh the access token
/// 2. Fetch the chart page and extract the titles
/// 3. Create the playlist
/// 4. Search every title and keep the matches, in chart order
/// 5. Append the matches in one request
///
/// # Failure policy
///
/// - A refresh without an access token keeps the stored token and continues.
/// - A playlist without a share URL is reported and the run continues.
/// - A playlist without an id stops the run before any search is made.
/// - Empty charts and titles without a match are reported and skipped.
/// - A rejected append is reported with its status code, it is not an error.
/// - Transport failures and unusable search responses stop the run.
///
/// Nothing is retried and a playlist that was already created is left in place.
pub async fn run<H: HttpClient>(
    http: &H,
    mut config: Config,
    date: &str,
    public: bool,
) -> Result<RunReport, PipelineError> {
    let mut state = RunState::Idle;
    let mut reached = Vec::new();
    let fail = |after: RunState| {
        move |source: Box<dyn Error + Send + Sync>| PipelineError::Step { after, source }
    };

    let token = refresh_access_token(http, &config)
        .await
        .map_err(fail(state))?;
    match token.access_token {
        Some(access_token) => {
            config.access_token = access_token;
            success!("Access token refreshed.");
        }
        None => warning!("Token refresh returned no access token, using the stored one."),
    }
    advance(&mut state, &mut reached);

    if !utils::is_valid_chart_date(date) {
        warning!("'{}' is not a valid YYYY-MM-DD date, the chart will likely be empty.", date);
    }
    let chart_url = billboard::chart_url(&config, date);
    let titles = billboard::fetch_chart(http, &config, date)
        .await
        .map_err(fail(state))?;
    info!("Your playlist - {:?}", titles);
    info!("Go to: {}", chart_url);
    if titles.is_empty() {
        warning!("No chart entries found for {}.", date);
    }
    advance(&mut state, &mut reached);

    let playlist = spotify::playlist::create(
        http,
        &config,
        utils::playlist_name(date),
        utils::playlist_description(date),
        public,
    )
    .await
    .map_err(fail(state))?;
    match &playlist.external_url {
        Some(url) => success!("Creation in progress! You can access it here: {}", url),
        None => warning!("Failed to create playlist or retrieve the URL."),
    }
    let Some(playlist_id) = playlist.id.clone() else {
        return Err(PipelineError::MissingPlaylistId);
    };
    advance(&mut state, &mut reached);

    let (track_uris, unmatched) = if titles.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        resolve_tracks(http, &config, &titles)
            .await
            .map_err(fail(state))?
    };
    advance(&mut state, &mut reached);

    let append = spotify::playlist::add_tracks(http, &config, &playlist_id, track_uris.clone())
        .await
        .map_err(fail(state))?;
    match append {
        AppendOutcome::Skipped => info!("{}", append),
        AppendOutcome::Added(_) => success!("{}", append),
        AppendOutcome::Rejected(_) => warning!("{}", append),
    }
    advance(&mut state, &mut reached);
    advance(&mut state, &mut reached);

    Ok(RunReport {
        state,
        chart_url,
        titles,
        playlist,
        track_uris,
        unmatched,
        append,
        reached,
    })
}

/// Searches every title in order, returning the matched URIs and the misses.
async fn resolve_tracks<H: HttpClient>(
    http: &H,
    config: &Config,
    titles: &[String],
) -> crate::Res<(Vec<String>, Vec<String>)> {
    let pb = ProgressBar::new(titles.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{pos}/{len}]")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Searching tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut results = Vec::with_capacity(titles.len());
    let mut unmatched = Vec::new();

    for title in titles {
        let found = match search_track(http, config, title).await {
            Ok(found) => found,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };
        if found.is_none() {
            pb.suspend(|| warning!("Could not find track for: {}", title));
            unmatched.push(title.clone());
        }
        results.push(found);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((utils::collect_resolved(results), unmatched))
}

/// `chartify playlist`: prompts for a date when needed and runs the pipeline.
pub async fn playlist(date: Option<String>, private: bool) {
    let date = super::chart_date(date);
    let config = Config::from_env();
    config.warn_missing();

    match run(&ReqwestClient::new(), config, &date, !private).await {
        Ok(report) => {
            if let Some(url) = report.playlist.external_url {
                success!("Playlist ready, open it here: {}", url);
            }
        }
        Err(e) => error!("Run aborted: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_order() {
        let mut state = RunState::Idle;
        let mut seen = vec![state];
        while state != RunState::Done {
            state = state.next();
            seen.push(state);
        }

        assert_eq!(
            seen,
            vec![
                RunState::Idle,
                RunState::TokenRefreshed,
                RunState::ChartFetched,
                RunState::PlaylistCreated,
                RunState::TracksResolved,
                RunState::TracksAppended,
                RunState::Done,
            ]
        );
        assert_eq!(RunState::Done.next(), RunState::Done);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::Step {
            after: RunState::PlaylistCreated,
            source: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "run failed after 'playlist created': connection reset");
        assert!(err.source().is_some());
        assert!(PipelineError::MissingPlaylistId.source().is_none());
    }
}
