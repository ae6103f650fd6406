//! # CLI Module
//!
//! User-facing commands of chartify. Each command resolves its inputs
//! (prompting when needed), builds the [`Config`](crate::config::Config) and
//! delegates to the billboard and spotify modules.
//!
//! ## Commands
//!
//! - [`playlist`] - Creates a Spotify playlist from the Hot 100 of a date
//! - [`chart`] - Prints the Hot 100 of a date as a table
//! - [`auth`] - Authorization code login that yields a refresh token
//!
//! ## Data Flow
//!
//! ```text
//! date (flag or prompt)
//!     ↓
//! token refresh → chart fetch → playlist create → track search → track append
//! ```
//!
//! [`run`] is the pipeline itself. It takes the HTTP client as a parameter and
//! returns a [`RunReport`], so it can be driven without a terminal or network.
//! The command wrappers own the output and exit code.

mod auth;
mod chart;
mod playlist;

pub use auth::auth;
pub use chart::chart;
pub use playlist::PipelineError;
pub use playlist::RunReport;
pub use playlist::RunState;
pub use playlist::playlist;
pub use playlist::run;

use crate::{error, utils};

fn chart_date(date: Option<String>) -> String {
    match date {
        Some(date) => date.trim().to_string(),
        None => match utils::prompt_date() {
            Ok(date) => date,
            Err(e) => error!("Cannot read date from stdin: {}", e),
        },
    }
}
