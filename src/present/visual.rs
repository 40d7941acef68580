//! Fallback visual assignment for articles without images.
//!
//! Every category in the registry carries a small pool of stock images and a
//! gradient palette. Articles missing an `image_url` draw from their
//! category's entries via a cycling counter, so same-category cards within a
//! single render pass never repeat an entry until the pool wraps. The counter
//! resets at the start of each render pass, which makes repeated renders of
//! the same article set reproducible.

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::Article;

/// Which synthesis strategy to use when an article has no image of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStyle {
    /// Cycle through the category's stock image pool.
    Pool,
    /// Synthesize a CSS gradient from the category's palette.
    Gradient,
}

impl Default for FallbackStyle {
    fn default() -> Self {
        Self::Gradient
    }
}

/// The visual a card should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visual {
    /// The article's own image. URL is untrusted feed data; the render layer
    /// attribute-escapes it.
    Image { url: String },
    /// A stock image from the category pool.
    PoolImage { url: &'static str },
    /// A generated gradient. Colors come from the static palette; the angle
    /// derives from the article's title hash.
    Gradient {
        start: &'static str,
        end: &'static str,
        angle: u16,
    },
}

struct CategoryVisuals {
    pool: &'static [&'static str],
    palette: &'static [(&'static str, &'static str)],
}

/// Category used when `source_category` is absent or unrecognized.
pub const BASELINE_CATEGORY: &str = "marketing";

const REGISTRY: &[(&str, CategoryVisuals)] = &[
    (
        "marketing",
        CategoryVisuals {
            pool: &[
                "assets/fallback/marketing-1.jpg",
                "assets/fallback/marketing-2.jpg",
                "assets/fallback/marketing-3.jpg",
            ],
            palette: &[
                ("#ff7a59", "#ffb88f"),
                ("#2e475d", "#516f90"),
                ("#00a4bd", "#7fd1de"),
            ],
        },
    ),
    (
        "advertising",
        CategoryVisuals {
            pool: &[
                "assets/fallback/advertising-1.jpg",
                "assets/fallback/advertising-2.jpg",
                "assets/fallback/advertising-3.jpg",
            ],
            palette: &[
                ("#6a11cb", "#2575fc"),
                ("#f7971e", "#ffd200"),
                ("#c31432", "#240b36"),
            ],
        },
    ),
    (
        "social",
        CategoryVisuals {
            pool: &[
                "assets/fallback/social-1.jpg",
                "assets/fallback/social-2.jpg",
                "assets/fallback/social-3.jpg",
            ],
            palette: &[
                ("#1da1f2", "#0e71c8"),
                ("#e1306c", "#f77737"),
                ("#0077b5", "#00a0dc"),
            ],
        },
    ),
    (
        "martech",
        CategoryVisuals {
            pool: &[
                "assets/fallback/martech-1.jpg",
                "assets/fallback/martech-2.jpg",
                "assets/fallback/martech-3.jpg",
            ],
            palette: &[
                ("#11998e", "#38ef7d"),
                ("#373b44", "#4286f4"),
                ("#8e2de2", "#4a00e0"),
            ],
        },
    ),
    (
        "adobe",
        CategoryVisuals {
            pool: &[
                "assets/fallback/adobe-1.jpg",
                "assets/fallback/adobe-2.jpg",
            ],
            palette: &[("#fa0f00", "#c9252d"), ("#ed2224", "#7a0c0c")],
        },
    ),
    (
        "salesforce",
        CategoryVisuals {
            pool: &[
                "assets/fallback/salesforce-1.jpg",
                "assets/fallback/salesforce-2.jpg",
            ],
            palette: &[("#00a1e0", "#032d60"), ("#1798c1", "#76ded9")],
        },
    ),
];

fn resolve(category: Option<&str>) -> (&'static str, &'static CategoryVisuals) {
    let wanted = category.unwrap_or(BASELINE_CATEGORY);
    REGISTRY
        .iter()
        .find(|(name, _)| *name == wanted)
        .or_else(|| REGISTRY.iter().find(|(name, _)| *name == BASELINE_CATEGORY))
        .map(|(name, visuals)| (*name, visuals))
        .expect("registry always contains the baseline category")
}

/// Simple 32-bit wrapping string hash (31-multiplier polynomial).
///
/// Deterministic across runs; used to vary the gradient angle per article so
/// two same-palette cards still read differently.
pub fn hash32(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

/// Assigns fallback visuals within one render pass.
///
/// Owns the per-category usage counters. Call [`reset`](Self::reset) at the
/// start of every tab render and every search render; a load-more
/// continuation keeps the same pass (no reset) so appended cards keep
/// cycling instead of repeating the page's first entries.
#[derive(Debug)]
pub struct VisualAssigner {
    style: FallbackStyle,
    counters: HashMap<&'static str, usize>,
}

impl VisualAssigner {
    pub fn new(style: FallbackStyle) -> Self {
        Self {
            style,
            counters: HashMap::new(),
        }
    }

    /// Forget all usage counters, starting a new render pass.
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Pick the visual for an article: its own image when present, otherwise
    /// the next entry in its category's pool or palette.
    pub fn assign(&mut self, article: &Article) -> Visual {
        if let Some(url) = article.image_url.as_deref() {
            if !url.is_empty() {
                return Visual::Image {
                    url: url.to_string(),
                };
            }
        }

        let (key, visuals) = resolve(article.source_category.as_deref());
        let counter = self.counters.entry(key).or_insert(0);
        let index = *counter;
        *counter += 1;

        match self.style {
            FallbackStyle::Pool => Visual::PoolImage {
                url: visuals.pool[index % visuals.pool.len()],
            },
            FallbackStyle::Gradient => {
                let (start, end) = visuals.palette[index % visuals.palette.len()];
                Visual::Gradient {
                    start,
                    end,
                    angle: (hash32(article.visual_seed()) % 360) as u16,
                }
            }
        }
    }
}
