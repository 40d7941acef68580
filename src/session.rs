//! Session composition root.
//!
//! Owns every piece of session-lifetime mutable state — the feed cache, the
//! per-tab render states, the pagination cursors, the visual counters — and
//! exposes the rendering operations the navigation plumbing invokes. All
//! operations are keyed by the tab id they were invoked for, never by a
//! "current tab" notion, so a slow fetch that resolves after the user moved
//! on still lands in the right tab's state.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use crate::config::Config;
use crate::feed::{FeedCache, FeedFetcher, FetchError};
use crate::pagination::Pagination;
use crate::present::{present, CardView, VisualAssigner};
use crate::rank::{bucket, Buckets};
use crate::render;
use crate::search::{search, SearchQuery};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Feed retrieval failed; retryable by re-invoking for the same tab.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The tab id has no configured feed. Not retryable.
    #[error("no feed configured for tab '{0}'")]
    UnknownTab(String),

    /// load_more/search was invoked before the tab ever rendered.
    #[error("tab '{0}' has not been rendered yet")]
    TabNotLoaded(String),
}

/// Result of a load-more step.
#[derive(Debug)]
pub struct LoadMore {
    /// Appendable card markup; empty when the tab is exhausted.
    pub markup: String,
    /// Whether another page remains after this one.
    pub has_more: bool,
}

struct TabState {
    buckets: Buckets,
    /// The tab's original full markup, kept so clearing a search restores
    /// the view without re-fetching.
    markup: String,
}

/// Session-scoped rendering pipeline.
///
/// Created once at startup, cleared wholesale by [`refresh`](Self::refresh).
pub struct Session {
    config: Config,
    cache: FeedCache,
    pagination: Pagination,
    visuals: VisualAssigner,
    tabs: HashMap<String, TabState>,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let fetcher = FeedFetcher::new(&config.feed_base_url)?;
        let cache = FeedCache::with_ttl(fetcher, config.cache_ttl());
        let visuals = VisualAssigner::new(config.fallback_style);
        Ok(Self {
            config,
            cache,
            pagination: Pagination::new(),
            visuals,
            tabs: HashMap::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a tab: fetch-or-cached articles, rank into tiers, present
    /// cards, initialize pagination, and return the tab's full fragment.
    ///
    /// Re-rendering a tab discards and rebuilds its state.
    pub async fn render_tab(&mut self, tab_id: &str) -> Result<String, RenderError> {
        let feed = self
            .config
            .feed_for_tab(tab_id)
            .ok_or_else(|| RenderError::UnknownTab(tab_id.to_string()))?
            .to_string();

        let articles = self.cache.get(&feed).await?;
        let buckets = bucket(articles.as_ref().clone());

        let now = Utc::now();
        self.visuals.reset();
        let featured: Vec<CardView> = buckets
            .featured
            .iter()
            .map(|a| present(a, now, true, &mut self.visuals))
            .collect();
        let fresh: Vec<CardView> = buckets
            .fresh
            .iter()
            .map(|a| present(a, now, false, &mut self.visuals))
            .collect();

        let revealed =
            self.pagination
                .initialize(tab_id, buckets.remaining.len(), self.config.page_size);
        let first_page: Vec<CardView> = buckets.remaining[..revealed]
            .iter()
            .map(|a| present(a, now, false, &mut self.visuals))
            .collect();

        let caption = (tab_id == self.config.main_tab).then(|| render::day_caption(now));
        let markup = render::tab_markup(
            tab_id,
            &render::TabSections {
                featured: &featured,
                fresh: &fresh,
                first_page: &first_page,
                has_more: self.pagination.has_more(tab_id),
            },
            caption,
        );

        tracing::info!(
            tab = %tab_id,
            articles = buckets.len(),
            revealed = revealed,
            "tab rendered"
        );

        self.tabs.insert(
            tab_id.to_string(),
            TabState {
                buckets,
                markup: markup.clone(),
            },
        );
        Ok(markup)
    }

    /// Reveal the next page of the tab's remaining articles.
    ///
    /// Returns an appendable fragment; calling past the end yields empty
    /// markup and stays a no-op.
    pub fn load_more(&mut self, tab_id: &str) -> Result<LoadMore, RenderError> {
        let state = self
            .tabs
            .get(tab_id)
            .ok_or_else(|| RenderError::TabNotLoaded(tab_id.to_string()))?;

        let range = self.pagination.reveal(tab_id, self.config.page_size);
        let now = Utc::now();
        // Same render pass continues: visual counters keep cycling
        let cards: Vec<CardView> = state.buckets.remaining[range]
            .iter()
            .map(|a| present(a, now, false, &mut self.visuals))
            .collect();

        Ok(LoadMore {
            markup: render::cards_markup(&cards, false),
            has_more: self.pagination.has_more(tab_id),
        })
    }

    /// Search within a rendered tab's articles.
    ///
    /// Queries under the minimum length mean "no search": the tab's stored
    /// original markup is returned so the caller can restore the view.
    pub fn search_tab(&mut self, tab_id: &str, raw_query: &str) -> Result<String, RenderError> {
        let state = self
            .tabs
            .get(tab_id)
            .ok_or_else(|| RenderError::TabNotLoaded(tab_id.to_string()))?;

        let Some(query) = SearchQuery::parse(raw_query) else {
            return Ok(state.markup.clone());
        };

        let all: Vec<_> = state.buckets.iter().cloned().collect();
        let matches = search(&all, &query);

        let now = Utc::now();
        self.visuals.reset();
        let cards: Vec<CardView> = matches
            .iter()
            .map(|a| present(a, now, false, &mut self.visuals))
            .collect();

        Ok(render::search_markup(raw_query, &cards))
    }

    /// The tab's original rendered markup, if it has rendered.
    pub fn rendered_markup(&self, tab_id: &str) -> Option<&str> {
        self.tabs.get(tab_id).map(|s| s.markup.as_str())
    }

    /// Drop all cached feeds, tab states, and pagination cursors. The next
    /// render of any tab fetches fresh data.
    pub fn refresh(&mut self) {
        self.cache.clear();
        self.tabs.clear();
        self.pagination.clear();
        tracing::info!("session refreshed");
    }
}
