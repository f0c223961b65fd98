//! Page fetching
//!
//! A check observes nothing but the character length of the page body, so the
//! fetcher returns only that. The response status is deliberately not
//! inspected: an error page still has a length, and a later pass comparing
//! against it reports the flip back as a change.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};

/// Trait for observing the current length of a tracked page.
///
/// Injected into [`crate::CaseService`] so tests can substitute a fake.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Perform one GET against `url` and return the character count of the
    /// decoded response body.
    async fn fetch_length(&self, url: &str) -> Result<usize>;
}

/// [`PageFetcher`] backed by a shared [`reqwest::Client`] with default
/// settings (no custom timeout, retry, or redirect policy).
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_length(&self, url: &str) -> Result<usize> {
        debug!("Fetching page: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok(body.chars().count())
    }
}
