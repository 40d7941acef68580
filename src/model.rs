//! Feed article schema.
//!
//! Feeds are JSON arrays of pre-scored articles produced by an upstream
//! aggregation job. Deserialization is lenient: only `id` is required, every
//! other field degrades to an empty or absent value so one sloppy article
//! never sinks the whole feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One article as it arrives in a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// RFC 3339 publish time. Unparseable values become `None` rather than
    /// rejecting the article.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published: Option<DateTime<Utc>>,

    /// Upstream relevance score, nominally 0 to 100.
    #[serde(default)]
    pub relevance_score: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Category key for fallback visual selection.
    #[serde(default)]
    pub source_category: Option<String>,
}

impl Article {
    /// Score used for ranking; articles without one sort as zero.
    pub fn score(&self) -> f64 {
        self.relevance_score.unwrap_or(0.0)
    }

    /// Stable per-article seed for generated visuals.
    pub fn visual_seed(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
