//! Feed retrieval and caching.

pub mod cache;
pub mod fetcher;

pub use cache::{FeedCache, FEED_TTL};
pub use fetcher::{hour_bucket, FeedFetcher, FetchError};
