use std::{sync::Arc, time::Duration};

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::Config,
    error,
    http::{HttpClient, HttpResponse},
    info,
    server::start_api_server,
    success,
    types::{AuthState, Token},
    warning,
};

/// Exchanges the stored refresh token for a fresh access token.
///
/// Sends one form-encoded request with the refresh token, client id and client
/// secret. The status code is not inspected: a response without an
/// `access_token` field yields a [`Token`] whose `access_token` is `None`, and
/// the caller decides what to do about it.
///
/// # Errors
///
/// Returns an error when the request fails at the transport level or the body
/// is not JSON.
///
/// # Example
///
/// ```
/// let token = refresh_access_token(&http, &config).await?;
/// if let Some(access) = token.access_token {
///     config.access_token = access;
/// }
/// ```
pub async fn refresh_access_token<H: HttpClient>(http: &H, config: &Config) -> Res<Token> {
    let response = http
        .post_form(
            &config.token_url,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", config.refresh_token.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ],
        )
        .await?;

    token_from_response(&response)
}

/// Exchanges an authorization code from the OAuth callback for a token.
///
/// Uses the client secret, so no PKCE verifier is involved. The redirect URI
/// must match the one used for the authorization request.
pub async fn exchange_code<H: HttpClient>(http: &H, config: &Config, code: &str) -> Res<Token> {
    let response = http
        .post_form(
            &config.token_url,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ],
        )
        .await?;

    token_from_response(&response)
}

fn token_from_response(response: &HttpResponse) -> Res<Token> {
    let json: Value = response.json()?;

    Ok(Token {
        access_token: json["access_token"].as_str().map(str::to_string),
        refresh_token: json["refresh_token"].as_str().map(str::to_string),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Random value echoed back by Spotify to tie the callback to this login.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the authorization URL the user opens in the browser.
pub fn authorize_url(config: &Config, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        auth_url = config.auth_url,
        client_id = urlencoding::encode(config.client_id.as_str()),
        redirect_uri = urlencoding::encode(config.redirect_uri.as_str()),
        scope = urlencoding::encode(&config.scope),
        state = state,
    )
}

/// Runs the authorization code flow to obtain a refresh token.
///
/// 1. Starts the local callback server
/// 2. Opens the authorization URL in the default browser
/// 3. Waits up to 60 seconds for the callback to store a token
/// 4. Prints the refresh token so it can be added to `.env`
///
/// Exits the program when the flow fails or times out.
pub async fn auth(config: Config) {
    let state = generate_state();
    let auth_url = authorize_url(&config, &state);

    let shared_state: Arc<Mutex<Option<AuthState>>> = Arc::new(Mutex::new(Some(AuthState {
        state,
        token: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            error!("Failed to start callback server: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(token) => match token.refresh_token {
            Some(refresh_token) => {
                success!("Authentication successful!");
                info!("Add the following lines to {}:", crate::config::env_file_path().display());
                println!(
                    "SPOTIFY_ACCESS_TOKEN={}",
                    token.access_token.unwrap_or_default()
                );
                println!("SPOTIFY_REFRESH_TOKEN={}", refresh_token);
            }
            None => error!("Spotify did not return a refresh token."),
        },
        None => error!("Authentication failed or timed out."),
    }
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthState>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|s| s.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
