use crate::shared::http::GlooTransport;
use crate::system::auth::storage::LocalStorageStore;
use client::{load_config, ApiClient, Config, SessionManager};
use leptos::prelude::*;
use std::sync::Arc;

const APP_CONFIG: &str = include_str!("../../app.toml");

/// Backend access and configuration, provided once at the root.
#[derive(Clone)]
pub struct AppServices {
    pub api: ApiClient,
    pub config: Arc<Config>,
}

impl AppServices {
    pub fn new() -> Self {
        let config = load_config(Some(APP_CONFIG));
        let session = Arc::new(SessionManager::new(Box::new(LocalStorageStore)));
        let api = ApiClient::new(&config.api, Arc::new(GlooTransport), session);
        log::info!("API base URL: {}", config.api.base_url);
        Self {
            api,
            config: Arc::new(config),
        }
    }
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>().expect("AppServices not provided")
}
