//! Pure article-to-card transformation.
//!
//! Derives the display fields of a card (relative time label, rating glyphs,
//! possibly-truncated summary, fallback visual) without touching any render
//! surface. `now` is passed explicitly so the transformation stays a pure
//! function.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_safe};

use crate::model::Article;
use crate::present::visual::{Visual, VisualAssigner};
use crate::util::truncate_chars;

/// Character cap for summaries on non-featured cards.
pub const SUMMARY_MAX_CHARS: usize = 140;

/// Tags shown per card.
const MAX_CARD_TAGS: usize = 3;

/// Glyph repeated to express the rating tier.
const RATING_GLYPH: &str = "★";

/// A fully derived card, ready for markup embedding.
///
/// All text fields are HTML-escaped and `url` is attribute-escaped; the
/// render layer interpolates them verbatim.
#[derive(Debug, Clone)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
    pub relative_time: String,
    pub rating: String,
    pub tags: Vec<String>,
    pub visual: Visual,
}

/// Derive a card from an article.
///
/// Featured cards keep their full summary; everything else truncates at
/// [`SUMMARY_MAX_CHARS`]. Missing fields degrade to empty strings rather
/// than failing the batch.
pub fn present(
    article: &Article,
    now: DateTime<Utc>,
    featured: bool,
    visuals: &mut VisualAssigner,
) -> CardView {
    let summary = if featured {
        encode_safe(&article.summary).into_owned()
    } else {
        encode_safe(truncate_chars(&article.summary, SUMMARY_MAX_CHARS).as_ref()).into_owned()
    };

    CardView {
        id: article.id.clone(),
        title: encode_safe(&article.title).into_owned(),
        url: encode_double_quoted_attribute(&article.url).into_owned(),
        source: encode_safe(&article.source).into_owned(),
        summary,
        relative_time: relative_time(article.published, now),
        rating: rating_glyph(article.relevance_score),
        tags: article
            .tags
            .iter()
            .take(MAX_CARD_TAGS)
            .map(|t| encode_safe(t).into_owned())
            .collect(),
        visual: visuals.assign(article),
    }
}

/// Human relative-time label for a publish instant.
///
/// Under five minutes reads "just now"; then minutes, hours, "yesterday" for
/// exactly one day, and days beyond that. No timestamp yields an empty label.
pub fn relative_time(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(published);

    let minutes = elapsed.num_minutes();
    if minutes < 5 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days == 1 {
        return "yesterday".to_string();
    }
    format!("{days}d ago")
}

/// Map a relevance score to a repeated-glyph rating.
///
/// Five tiers over the 0–100 range with boundaries at 20, 40, 60, and 80.
/// A missing score renders no rating at all.
pub fn rating_glyph(score: Option<f64>) -> String {
    let Some(score) = score else {
        return String::new();
    };
    let tier = match score {
        s if s < 20.0 => 1,
        s if s < 40.0 => 2,
        s if s < 60.0 => 3,
        s if s < 80.0 => 4,
        _ => 5,
    };
    RATING_GLYPH.repeat(tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::visual::FallbackStyle;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_time_bands() {
        let now = t0();
        let at = |d: Duration| Some(now - d);

        assert_eq!(relative_time(at(Duration::minutes(0)), now), "just now");
        assert_eq!(relative_time(at(Duration::minutes(4)), now), "just now");
        assert_eq!(relative_time(at(Duration::minutes(5)), now), "5m ago");
        assert_eq!(relative_time(at(Duration::minutes(59)), now), "59m ago");
        assert_eq!(relative_time(at(Duration::hours(1)), now), "1h ago");
        assert_eq!(relative_time(at(Duration::hours(23)), now), "23h ago");
        assert_eq!(relative_time(at(Duration::hours(24)), now), "yesterday");
        assert_eq!(relative_time(at(Duration::hours(47)), now), "yesterday");
        assert_eq!(relative_time(at(Duration::days(2)), now), "2d ago");
        assert_eq!(relative_time(at(Duration::days(6)), now), "6d ago");
    }

    #[test]
    fn test_relative_time_missing_is_empty() {
        assert_eq!(relative_time(None, t0()), "");
    }

    #[test]
    fn test_rating_tier_boundaries() {
        assert_eq!(rating_glyph(Some(0.0)), "★");
        assert_eq!(rating_glyph(Some(19.0)), "★");
        assert_eq!(rating_glyph(Some(20.0)), "★★");
        assert_eq!(rating_glyph(Some(39.0)), "★★");
        assert_eq!(rating_glyph(Some(40.0)), "★★★");
        assert_eq!(rating_glyph(Some(60.0)), "★★★★");
        assert_eq!(rating_glyph(Some(79.0)), "★★★★");
        assert_eq!(rating_glyph(Some(80.0)), "★★★★★");
        assert_eq!(rating_glyph(Some(100.0)), "★★★★★");
    }

    #[test]
    fn test_rating_monotone_in_score() {
        let mut last = 0;
        for s in 0..=100 {
            let tier = rating_glyph(Some(f64::from(s))).chars().count();
            assert!(tier >= last, "tier dropped at score {s}");
            last = tier;
        }
    }

    #[test]
    fn test_rating_missing_score_is_empty() {
        assert_eq!(rating_glyph(None), "");
    }

    fn sample_article(summary: &str) -> Article {
        serde_json::from_value(serde_json::json!({
            "id": "a1",
            "title": "Tools & tricks <for> \"everyone\"",
            "url": "https://example.com/a?x=1&y=2",
            "source": "Wire",
            "summary": summary,
            "relevance_score": 85,
            "image_url": "https://cdn.example.com/img.jpg",
        }))
        .unwrap()
    }

    #[test]
    fn test_present_escapes_text_and_url() {
        let mut visuals = VisualAssigner::new(FallbackStyle::Gradient);
        let card = present(&sample_article("short"), t0(), false, &mut visuals);
        assert!(!card.title.contains('<'));
        assert!(card.title.contains("&amp;"));
        assert!(card.title.contains("&lt;for&gt;"));
        assert!(card.url.contains("&amp;"));
        assert!(!card.url.contains("\""));
    }

    #[test]
    fn test_present_truncates_only_non_featured() {
        let long = "word ".repeat(60);
        let mut visuals = VisualAssigner::new(FallbackStyle::Gradient);

        let compact = present(&sample_article(&long), t0(), false, &mut visuals);
        assert!(compact.summary.len() < long.len());
        assert!(compact.summary.ends_with("..."));

        let featured = present(&sample_article(&long), t0(), true, &mut visuals);
        assert_eq!(featured.summary, long);
    }

    #[test]
    fn test_present_uses_own_image() {
        let mut visuals = VisualAssigner::new(FallbackStyle::Gradient);
        let card = present(&sample_article("s"), t0(), false, &mut visuals);
        assert!(matches!(card.visual, Visual::Image { .. }));
    }

    #[test]
    fn test_present_caps_tags() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "id": "a",
            "tags": ["one", "two", "three", "four", "five"],
        }))
        .unwrap();
        let mut visuals = VisualAssigner::new(FallbackStyle::Gradient);
        let card = present(&article, t0(), false, &mut visuals);
        assert_eq!(card.tags.len(), 3);
    }
}
