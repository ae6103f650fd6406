use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{Res, api, config::Config, http::ReqwestClient, types::AuthState};

/// Serves the OAuth callback route until the process exits.
pub async fn start_api_server(state: Arc<Mutex<Option<AuthState>>>, config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address)?;

    let app = Router::new().route(
        "/callback",
        get(api::callback::<ReqwestClient>)
            .layer::<_, std::convert::Infallible>(Extension(state))
            .layer::<_, std::convert::Infallible>(Extension(config))
            .layer(Extension(Arc::new(ReqwestClient::new()))),
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
