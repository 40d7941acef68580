//! In-memory article search.
//!
//! Conjunctive case-insensitive substring matching over an article's title,
//! summary, source, and tags. Results rank by how many terms hit the title,
//! then by relevance score.

use crate::model::Article;

/// Queries shorter than this (after trimming) mean "no search".
pub const MIN_QUERY_LEN: usize = 2;

/// A parsed, normalized search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Parse raw input into a query, or `None` when the trimmed input is
    /// below [`MIN_QUERY_LEN`] characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return None;
        }
        Some(Self {
            terms: trimmed
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

fn combined_text(article: &Article) -> String {
    let mut text = String::new();
    text.push_str(&article.title);
    text.push(' ');
    text.push_str(&article.summary);
    text.push(' ');
    text.push_str(&article.source);
    for tag in &article.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text.to_lowercase()
}

/// Run a query over articles, returning matches in rank order.
///
/// Every term must appear somewhere in the article's combined text. Matches
/// sort by title hit count descending, then score descending; the sort is
/// stable, so equally ranked matches keep their input order.
pub fn search<'a>(articles: &'a [Article], query: &SearchQuery) -> Vec<&'a Article> {
    let mut matches: Vec<(&Article, usize)> = articles
        .iter()
        .filter_map(|article| {
            let haystack = combined_text(article);
            if !query.terms().iter().all(|t| haystack.contains(t.as_str())) {
                return None;
            }
            let title = article.title.to_lowercase();
            let title_hits = query.terms().iter().filter(|t| title.contains(t.as_str())).count();
            Some((article, title_hits))
        })
        .collect();

    matches.sort_by(|(a, a_hits), (b, b_hits)| {
        b_hits
            .cmp(a_hits)
            .then_with(|| {
                b.score()
                    .partial_cmp(&a.score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    matches.into_iter().map(|(article, _)| article).collect()
}
