//! Ranking and tiering.
//!
//! Articles sort by relevance score descending, ties broken by publish time
//! descending, then split positionally into three display tiers.

use std::cmp::Ordering;

use crate::model::Article;

/// Articles in the top featured tier.
pub const FEATURED_COUNT: usize = 3;

/// Articles in the fresh tier, after the featured ones.
pub const FRESH_COUNT: usize = 9;

/// Ranked articles split into the three display tiers.
///
/// The split is positional over the ranked order: the first
/// [`FEATURED_COUNT`] are featured, the next [`FRESH_COUNT`] are fresh, the
/// rest are remaining. Short feeds fill the tiers in order and leave the
/// tail tiers empty.
#[derive(Debug, Default)]
pub struct Buckets {
    pub featured: Vec<Article>,
    pub fresh: Vec<Article>,
    pub remaining: Vec<Article>,
}

impl Buckets {
    pub fn len(&self) -> usize {
        self.featured.len() + self.fresh.len() + self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All articles in ranked order across the tiers.
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.featured
            .iter()
            .chain(self.fresh.iter())
            .chain(self.remaining.iter())
    }
}

/// Sort articles by score descending, then publish time descending.
///
/// The sort is stable, so equally-scored equally-dated articles keep their
/// feed order. Articles without a score rank as zero; articles without a
/// publish time lose every recency tiebreak.
pub fn sort_ranked(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.published.cmp(&a.published))
    });
}

/// Rank a feed and split it into display tiers.
pub fn bucket(mut articles: Vec<Article>) -> Buckets {
    sort_ranked(&mut articles);

    let featured_end = articles.len().min(FEATURED_COUNT);
    let mut rest = articles.split_off(featured_end);
    let fresh_end = rest.len().min(FRESH_COUNT);
    let remaining = rest.split_off(fresh_end);

    Buckets {
        featured: articles,
        fresh: rest,
        remaining,
    }
}
