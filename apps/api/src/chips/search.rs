// Suggestion client. How the widget asks the server for matching items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{Field, Item};

/// Queries shorter than this (after trimming) never leave the widget.
pub const MIN_QUERY_CHARS: usize = 2;

pub const SUGGESTIONS_PATH: &str = "/api/get-suggestions";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: status {status}")]
    Status { status: u16 },
}

/// Trims raw input and returns it only if it is long enough to search.
pub fn searchable_query(raw: &str) -> Option<&str> {
    let query = raw.trim();
    (query.chars().count() >= MIN_QUERY_CHARS).then_some(query)
}

/// Anything that can answer a suggestion query for a field.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, field: Field, query: &str) -> Result<Vec<Item>, SearchError>;
}

/// `SuggestionSource` that calls `GET /api/get-suggestions` over HTTP.
#[derive(Clone)]
pub struct HttpSuggestionClient {
    client: Client,
    endpoint: String,
}

impl HttpSuggestionClient {
    /// `base_url` is the site origin, e.g. `https://talentlink.example`.
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUGGESTIONS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionClient {
    async fn suggest(&self, field: Field, query: &str) -> Result<Vec<Item>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("type", field.as_str()), ("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let items: Vec<Item> = response.json().await?;
        debug!(field = %field, hits = items.len(), "suggestions received");
        Ok(items)
    }
}
