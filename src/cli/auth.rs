use crate::{config::Config, spotify};

pub async fn auth() {
    spotify::auth::auth(Config::from_env()).await;
}
