//! Article presentation: card derivation and fallback visuals.

pub mod card;
pub mod visual;

pub use card::{present, rating_glyph, relative_time, CardView, SUMMARY_MAX_CHARS};
pub use visual::{FallbackStyle, Visual, VisualAssigner};
