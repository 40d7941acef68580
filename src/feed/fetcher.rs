//! HTTP retrieval of per-tab article feeds.
//!
//! Feeds are static JSON files regenerated upstream every few hours, so the
//! request URL carries an hour-bucket discriminator: requests within the same
//! hour address an identical resource (letting intermediary HTTP caches do
//! their job) while crossing an hour boundary forces a fresh fetch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use thiserror::Error;
use url::Url;

use crate::model::Article;

/// Per-request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
/// Feed files are article arrays capped upstream at ~100 entries; anything
/// near this limit is corrupt or hostile.
const MAX_FEED_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// Errors surfaced by a feed retrieval.
///
/// All of these are retryable by re-invoking the fetch for the same key; the
/// fetcher itself never retries (callers own that decision).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the 15-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not a JSON array of articles
    #[error("Feed parse error: {0}")]
    Parse(String),
    /// Response body exceeded the 4MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Feed base URL or path could not be joined into a valid URL
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
}

/// The hour-bucket cache-busting discriminator for a given instant.
///
/// `floor(unix_seconds / 3600)`: stable within an hour, new value at every
/// hour boundary.
pub fn hour_bucket(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(3600)
}

/// Fetches and parses feed files relative to a base URL.
pub struct FeedFetcher {
    client: reqwest::Client,
    base: Url,
}

impl FeedFetcher {
    /// Build a fetcher for feed paths under `base_url`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        // A trailing slash keeps Url::join from replacing the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Retrieve one feed: `GET {base}/{path}?v={hour_bucket}`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] after 15 seconds
    /// - [`FetchError::HttpStatus`] on any non-2xx response
    /// - [`FetchError::ResponseTooLarge`] beyond 4MB
    /// - [`FetchError::Parse`] when the body is not an article array
    pub async fn fetch(&self, path: &str) -> Result<Vec<Article>, FetchError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("v", &hour_bucket(Utc::now()).to_string());

        tracing::debug!(url = %url, "fetching feed");

        let response = tokio::time::timeout(FETCH_TIMEOUT, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;
        let articles: Vec<Article> =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

        tracing::debug!(path = %path, count = articles.len(), "feed fetched");
        Ok(articles)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: trust Content-Length when present
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
