use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    config::Config, http::HttpClient, spotify::auth::exchange_code, types::AuthState, warning,
};

/// Handles the redirect back from the Spotify authorization page.
///
/// The `state` parameter must match the pending login before the code is
/// exchanged. On success the token is stored in the shared state, where
/// `auth` picks it up.
pub async fn callback<H>(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthState>>>>,
    Extension(config): Extension<Config>,
    Extension(http): Extension<Arc<H>>,
) -> Html<&'static str>
where
    H: HttpClient + Send + Sync + 'static,
{
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(auth_state) = state.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    if params.get("state") != Some(&auth_state.state) {
        warning!("Callback state does not match, ignoring it.");
        return Html("<h4>State mismatch.</h4>");
    }

    match exchange_code(http.as_ref(), &config, code).await {
        Ok(token) if token.access_token.is_some() => {
            auth_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Ok(_) => {
            warning!("Token exchange returned no access token.");
            Html("<h4>Login failed.</h4>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
