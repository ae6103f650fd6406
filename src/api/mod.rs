//! # API Module
//!
//! HTTP handlers for the local server started by `chartify auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization page,
//!   checks the `state` parameter and exchanges the authorization code for a
//!   token. The token is stored in the shared auth state where the waiting
//!   `auth` command picks it up.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use chartify::{api::callback, http::ReqwestClient};
//!
//! let app = Router::new().route("/callback", get(callback::<ReqwestClient>));
//! ```

mod callback;

pub use callback::callback;
