pub mod api;
pub mod config;
pub mod feedback;
pub mod models;
pub mod routing;
pub mod screens;
pub mod session;
pub mod validation;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Session(#[from] session::SessionError),
    #[error(transparent)]
    Api(#[from] api::ApiError),
}

// Общее состояние клиента: настройки, сессия и экраны поверх API
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub screens: screens::Screens,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self, StartupError> {
        let store = session::SessionStore::file(&config.session_file);
        let auth = session::AuthContext::restore(store)?;
        let client = api::ApiClient::from_config(&config, auth)?;
        info!("Using API at {}", client.base_url());

        Ok(Self {
            config,
            screens: screens::Screens::new(client),
        })
    }

    pub fn auth(&self) -> &session::AuthContext {
        self.screens.auth()
    }
}
