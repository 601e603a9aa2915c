//! Service configuration and wiring
//!
//! The gateway binary fills `ServiceConfig` from flags and environment;
//! everything below turns it into live provider clients.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::curator::VideoCurator;
use crate::error::{ProviderError, SearchError};
use crate::generator::SyllabusGenerator;
use crate::llm::{OpenAiConfig, OpenAiTextGenerator, CLIENT_TIMEOUT_MARGIN};
use crate::orchestrator::CourseOrchestrator;
use crate::server::{cors_layer, parse_allowed_origins, AppState};
use crate::youtube::YouTubeSearchClient;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    MissingCredential(&'static str),

    #[error("invalid allowed origins: {0}")]
    Origins(String),

    #[error("failed to build text generation client: {0}")]
    TextClient(#[from] ProviderError),

    #[error("failed to build video search client: {0}")]
    SearchClient(#[from] SearchError),
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub openai: OpenAiConfig,
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    pub allowed_origins: String,
    pub search_timeout: Duration,
}

impl ServiceConfig {
    /// Reject blank credentials before any socket is bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("OPENAI_API_KEY"));
        }
        if self.youtube_api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("YOUTUBE_API_KEY"));
        }
        Ok(())
    }

    pub fn cors(&self) -> Result<CorsLayer, ConfigError> {
        let origins = parse_allowed_origins(&self.allowed_origins).map_err(ConfigError::Origins)?;
        Ok(cors_layer(origins))
    }

    pub fn build_state(&self) -> Result<AppState, ConfigError> {
        self.validate()?;

        let generation_timeout = Duration::from_secs(self.openai.timeout_seconds);
        let text = Arc::new(OpenAiTextGenerator::new(self.openai.clone())?);
        let generator = SyllabusGenerator::new(text).with_timeout(generation_timeout);

        let search = Arc::new(
            YouTubeSearchClient::new(&self.youtube_api_key, self.search_timeout + CLIENT_TIMEOUT_MARGIN)?
                .with_base_url(&self.youtube_base_url),
        );
        let curator = VideoCurator::new(search).with_timeout(self.search_timeout);

        Ok(AppState::new(CourseOrchestrator::new(generator, curator)))
    }
}
