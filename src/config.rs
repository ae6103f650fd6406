//! Configuration management for chartify.
//!
//! This module loads configuration from environment variables and `.env` files
//! and turns it into a single [`Config`] value. The value is handed explicitly to
//! every step of a run, so nothing reads the process environment after startup.
//!
//! The lookup order is:
//! 1. Environment variables already set for the process (highest priority)
//! 2. `.env` file in the local data directory (`<data_local_dir>/chartify/.env`)
//! 3. `.env` file in the current working directory
//! 4. Built-in defaults for endpoints and optional settings

use std::{env, path::PathBuf};

use crate::warning;

pub const DEFAULT_AUTH_SCOPE: &str = "playlist-modify-public playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CHART_URL: &str = "https://www.billboard.com/charts/hot-100";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from `.env` files.
///
/// Creates the `chartify` directory in the platform-specific local data
/// directory if needed, then loads `chartify/.env` from there and finally a
/// `.env` in the working directory. Both files are optional. `dotenv` never
/// overrides a variable that is already set, so the first source wins.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/chartify/.env`
/// - macOS: `~/Library/Application Support/chartify/.env`
/// - Windows: `%LOCALAPPDATA%/chartify/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the `.env` file inside the local data directory.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chartify/.env");
    path
}

/// Credential set and endpoints for one run.
///
/// `access_token` starts as the stored access credential and is replaced once
/// per run, right after the token refresh. Nothing is written back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub chart_url: String,
    pub server_address: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Missing credentials are not a startup error: each one becomes an empty
    /// string. Commands that need them call [`Config::warn_missing`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_default()
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID"),
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI"),
            user_id: required("SPOTIFY_USER_ID"),
            access_token: required("SPOTIFY_ACCESS_TOKEN"),
            refresh_token: required("SPOTIFY_REFRESH_TOKEN"),
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_AUTH_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: trim_slash(optional("SPOTIFY_API_URL", DEFAULT_API_URL)),
            chart_url: trim_slash(optional("BILLBOARD_CHART_URL", DEFAULT_CHART_URL)),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        }
    }

    /// Names of the credential variables that are empty, in declaration order.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("SPOTIFY_API_AUTH_CLIENT_ID", &self.client_id),
            ("SPOTIFY_API_AUTH_CLIENT_SECRET", &self.client_secret),
            ("SPOTIFY_API_REDIRECT_URI", &self.redirect_uri),
            ("SPOTIFY_USER_ID", &self.user_id),
            ("SPOTIFY_ACCESS_TOKEN", &self.access_token),
            ("SPOTIFY_REFRESH_TOKEN", &self.refresh_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// Warns once for every missing credential. The remote service then
    /// rejects the calls that needed it.
    pub fn warn_missing(&self) {
        for key in self.missing_credentials() {
            warning!("{} is not set, Spotify will reject calls that need it", key);
        }
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_to_endpoints() {
        let config = Config::from_lookup(lookup_from(&[("SPOTIFY_USER_ID", "me")]));

        assert_eq!(config.user_id, "me");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.chart_url, DEFAULT_CHART_URL);
        assert_eq!(config.scope, DEFAULT_AUTH_SCOPE);
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
    }

    #[test]
    fn test_missing_credentials_become_empty() {
        let config = Config::from_lookup(lookup_from(&[("SPOTIFY_REFRESH_TOKEN", "  ")]));

        assert!(config.client_id.is_empty());
        assert!(config.refresh_token.is_empty());
        assert!(config.access_token.is_empty());
    }

    #[test]
    fn test_missing_credentials_lists_only_empty_ones() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "id"),
            ("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret"),
            ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
            ("SPOTIFY_USER_ID", " "),
        ]));

        assert_eq!(
            config.missing_credentials(),
            vec![
                "SPOTIFY_USER_ID",
                "SPOTIFY_ACCESS_TOKEN",
                "SPOTIFY_REFRESH_TOKEN"
            ]
        );
    }

    #[test]
    fn test_complete_credentials_have_nothing_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "id"),
            ("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret"),
            ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
            ("SPOTIFY_USER_ID", "me"),
            ("SPOTIFY_ACCESS_TOKEN", "access"),
            ("SPOTIFY_REFRESH_TOKEN", "refresh"),
        ]));

        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn test_overrides_drop_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
            ("BILLBOARD_CHART_URL", "http://localhost:9001/charts/"),
        ]));

        assert_eq!(config.api_url, "http://localhost:9000/v1");
        assert_eq!(config.chart_url, "http://localhost:9001/charts");
    }
}
