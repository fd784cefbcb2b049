//! API clients for the history, Wikipedia and Gemini services

pub mod gemini;
pub mod history;
pub mod wikipedia;

use reqwest::Client;

use crate::config::Config;
use crate::enrich::Enricher;
use crate::error::ApiError;

pub use gemini::GeminiClient;
pub use history::HistoryClient;
pub use wikipedia::WikipediaClient;

/// A service that turns a free-text prompt into free text
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    /// Generate a reply for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;

    /// Whether the generator has credentials to work with
    fn is_configured(&self) -> bool {
        true
    }
}

/// Everything the CLI talks to, built from one config
pub struct Services<G = GeminiClient> {
    /// Day listings
    pub history: HistoryClient,
    /// Thumbnails
    pub wikipedia: WikipediaClient,
    /// AI translation, explanation, related events and search
    pub enricher: Enricher<G>,
}

impl Services<GeminiClient> {
    /// Build all clients from the config, sharing one connection pool
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let http = http_client(config)?;

        Ok(Self {
            history: HistoryClient::with_client(http.clone(), &config.history_base_url),
            wikipedia: WikipediaClient::with_client(
                http.clone(),
                &config.wikipedia_api_url,
                &config.user_agent,
                config.thumbnail_size,
            ),
            enricher: Enricher::new(GeminiClient::with_client(
                http,
                &config.gemini_api_url,
                &config.gemini_model,
                config.api_key(),
            )),
        })
    }
}

/// Shared reqwest client honouring the configured timeout
pub fn http_client(config: &Config) -> Result<Client, ApiError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
