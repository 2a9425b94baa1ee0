//! Application state.

use std::sync::Arc;

use tracing::warn;

use crate::{
    config::ServerConfig,
    error::ApiResult,
    gemini::{GeminiClient, TextGenerator},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` until an API key is configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> ApiResult<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = match &config.google_api_key {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key.clone(),
                config.model.clone(),
                &config.gemini_base_url,
            )?)),
            None => {
                warn!("GOOGLE_API_KEY is not set; summarize requests will fail");
                None
            }
        };
        Ok(Self {
            config: Arc::new(config),
            generator,
        })
    }

    pub fn with_generator(config: ServerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            generator: Some(generator),
        }
    }
}
