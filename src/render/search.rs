//! Search results fragment.

use html_escape::encode_safe;

use crate::present::CardView;
use crate::render::cards_markup;

/// Compose the search results fragment: a zero-results state, or a
/// result-count header followed by a flat card grid.
pub fn search_markup(raw_query: &str, cards: &[CardView]) -> String {
    let query = encode_safe(raw_query.trim());

    if cards.is_empty() {
        return format!(
            "<div class=\"search-results search-results--empty\">\n\
             <p>No articles match \u{201c}{query}\u{201d}.</p>\n\
             </div>\n"
        );
    }

    let noun = if cards.len() == 1 { "article" } else { "articles" };
    let mut html = format!(
        "<div class=\"search-results\">\n\
         <header class=\"search-results__header\">{count} {noun} matching \
         \u{201c}{query}\u{201d}</header>\n\
         <section class=\"search-results__grid\">\n",
        count = cards.len(),
    );
    html.push_str(&cards_markup(cards, false));
    html.push_str("</section>\n</div>\n");
    html
}
