use std::sync::Arc;

use crate::{auth::JwtKeys, config::Config, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub jwt: JwtKeys,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::connect(&config.database.url).await?;
        store.init().await?;

        Ok(Self {
            store: Arc::new(store),
            jwt: JwtKeys::new(config.auth.jwt_secret.as_bytes()),
            config,
        })
    }
}
