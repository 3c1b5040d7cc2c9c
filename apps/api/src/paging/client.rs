use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::pager::PageRequest;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: status {status}")]
    Status { status: u16 },
}

/// Returns the card markup for one page of a listing.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<String, PageError>;
}

#[derive(Clone)]
pub struct HttpPageClient {
    client: Client,
    base_url: String,
}

impl HttpPageClient {
    pub fn new(base_url: &str) -> Result<Self, PageError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, PageError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, request: &PageRequest) -> String {
        format!("{}{}", self.base_url, request.listing.path())
    }
}

#[async_trait]
impl PageSource for HttpPageClient {
    async fn fetch(&self, request: &PageRequest) -> Result<String, PageError> {
        let response = self
            .client
            .get(self.url_for(request))
            .query(&[("offset", request.offset)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        debug!(listing = ?request.listing, offset = request.offset, bytes = html.len(), "page received");
        Ok(html)
    }
}
