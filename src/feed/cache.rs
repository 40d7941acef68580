//! Time-boxed in-memory feed cache.
//!
//! One entry per feed key, refreshed wholesale once it is older than the TTL.
//! Replacement is atomic: the map never holds a partially updated
//! collection, and a failed fetch leaves the previous entry untouched (it is
//! simply not returned — the caller decides whether to retry).
//!
//! Concurrent `get` calls for the same key coalesce: a per-key async lock
//! serializes the fetch, and the second caller re-checks the cache after
//! acquiring it, so one miss produces exactly one HTTP request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::feed::fetcher::{FeedFetcher, FetchError};
use crate::model::Article;

/// How long a fetched collection stays fresh (15 minutes).
pub const FEED_TTL: Duration = Duration::from_secs(900);

struct CacheEntry {
    articles: Arc<Vec<Article>>,
    fetched_at: Instant,
}

/// TTL cache over the feed fetcher, keyed by feed path.
pub struct FeedCache {
    fetcher: FeedFetcher,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FeedCache {
    pub fn new(fetcher: FeedFetcher) -> Self {
        Self::with_ttl(fetcher, FEED_TTL)
    }

    /// Cache with a custom TTL. `Duration::ZERO` disables caching entirely,
    /// which tests use to force the miss path.
    pub fn with_ttl(fetcher: FeedFetcher, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Return the feed's articles, fetching only when the cached entry is
    /// missing or stale.
    ///
    /// # Errors
    ///
    /// Propagates [`FetchError`] from the miss path. Failures are never
    /// cached; the next `get` retries.
    pub async fn get(&self, key: &str) -> Result<Arc<Vec<Article>>, FetchError> {
        if let Some(articles) = self.fresh(key) {
            tracing::debug!(key = %key, "feed cache hit");
            return Ok(articles);
        }

        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        // Another caller may have populated the entry while we waited
        if let Some(articles) = self.fresh(key) {
            tracing::debug!(key = %key, "feed cache populated while waiting");
            return Ok(articles);
        }

        let articles = Arc::new(self.fetcher.fetch(key).await?);
        tracing::info!(key = %key, count = articles.len(), "feed cache refreshed");
        self.lock_entries().insert(
            key.to_string(),
            CacheEntry {
                articles: Arc::clone(&articles),
                fetched_at: Instant::now(),
            },
        );
        Ok(articles)
    }

    /// Drop every entry, forcing the next `get` of each key to fetch fresh.
    pub fn clear(&self) {
        self.lock_entries().clear();
        tracing::debug!("feed cache cleared");
    }

    fn fresh(&self, key: &str) -> Option<Arc<Vec<Article>>> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.articles))
    }

    fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            inflight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
