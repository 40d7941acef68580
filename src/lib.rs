//! newsdeck — renders ranked news digests from pre-scored JSON article feeds.
//!
//! The pipeline: [`feed::FeedCache`] fetches and caches per-tab article
//! feeds, [`rank`] sorts and tiers them, [`present`] derives display cards
//! (with deterministic fallback visuals for imageless articles), [`render`]
//! emits HTML fragments, and [`session::Session`] ties it all together with
//! per-tab pagination and search.

pub mod config;
pub mod feed;
pub mod model;
pub mod pagination;
pub mod present;
pub mod rank;
pub mod render;
pub mod search;
pub mod session;
pub mod util;
