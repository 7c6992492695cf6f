use crate::query::{categories_url, events_url};
use async_trait::async_trait;
use hazardmap_core::config::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use hazardmap_core::error::{HazardError, Result};
use hazardmap_core::models::{Category, Event, EventFilter};
use hazardmap_core::ports::EventSource;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// EONET API client
pub struct EonetClient {
    /// Base URL for the API (e.g., "https://eonet.gsfc.nasa.gov/api/v3")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl EonetClient {
    /// Create a new client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(HazardError::ConfigMissing { key: "api_base_url".to_string() });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HazardError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Create with the public EONET endpoint
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_API_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a URL and decode its JSON body
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "Sending API request");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| HazardError::Transport(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            tracing::warn!(url = %url, status = status.as_u16(), "API request failed");
            return Err(HazardError::Api { status: status.as_u16(), body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| HazardError::Transport(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| HazardError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EventSource for EonetClient {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let url = categories_url(&self.base_url)?;
        let envelope: CategoriesEnvelope = self.fetch_json(url).await?;
        let categories = envelope.categories.unwrap_or_default();

        tracing::debug!(category_count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    async fn fetch_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let url = events_url(&self.base_url, filter)?;
        let envelope: EventsEnvelope = self.fetch_json(url).await?;
        let events = envelope.events.unwrap_or_default();

        tracing::debug!(
            event_count = events.len(),
            status = ?filter.status,
            limit = filter.limit.get(),
            "Fetched events"
        );
        Ok(events)
    }
}

/// Response body of the categories endpoint
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

/// Response body of the events endpoint
#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    events: Option<Vec<Event>>,
}
