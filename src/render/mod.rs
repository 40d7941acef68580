//! HTML fragment emission.
//!
//! Everything here is pure string building over already-derived
//! [`CardView`]s: text fields arrive pre-escaped from the presenter, so the
//! templates interpolate them verbatim. Only values that bypass the
//! presenter (raw image URLs, search queries) are escaped at this layer.

pub mod search;
pub mod tab;

use html_escape::encode_double_quoted_attribute;

use crate::present::{CardView, Visual};

pub use search::search_markup;
pub use tab::{day_caption, tab_markup, TabSections};

/// Markup for one card.
///
/// Featured cards carry the `card--featured` modifier and their full
/// summary; the presenter already chose the right summary variant.
pub fn card_markup(card: &CardView, featured: bool) -> String {
    let class = if featured { "card card--featured" } else { "card" };
    let mut html = format!(
        "<article class=\"{class}\" data-id=\"{id}\">\n{visual}",
        id = encode_double_quoted_attribute(&card.id),
        visual = visual_markup(&card.visual),
    );
    html.push_str(&format!(
        "<h3 class=\"card__title\"><a href=\"{url}\">{title}</a></h3>\n",
        url = card.url,
        title = card.title,
    ));
    html.push_str(&format!(
        "<p class=\"card__meta\"><span class=\"card__source\">{source}</span>\
         <span class=\"card__time\">{time}</span>\
         <span class=\"card__rating\">{rating}</span></p>\n",
        source = card.source,
        time = card.relative_time,
        rating = card.rating,
    ));
    if !card.summary.is_empty() {
        html.push_str(&format!("<p class=\"card__summary\">{}</p>\n", card.summary));
    }
    if !card.tags.is_empty() {
        html.push_str("<ul class=\"card__tags\">");
        for tag in &card.tags {
            html.push_str(&format!("<li>{tag}</li>"));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</article>\n");
    html
}

/// Markup for a flat run of cards, in order.
pub fn cards_markup(cards: &[CardView], featured: bool) -> String {
    cards.iter().map(|c| card_markup(c, featured)).collect()
}

fn visual_markup(visual: &Visual) -> String {
    match visual {
        Visual::Image { url } => format!(
            "<img class=\"card__visual\" src=\"{}\" alt=\"\" loading=\"lazy\">\n",
            encode_double_quoted_attribute(url)
        ),
        Visual::PoolImage { url } => format!(
            "<img class=\"card__visual card__visual--fallback\" src=\"{url}\" alt=\"\" loading=\"lazy\">\n"
        ),
        Visual::Gradient { start, end, angle } => format!(
            "<div class=\"card__visual card__visual--generated\" \
             style=\"background:linear-gradient({angle}deg,{start},{end})\"></div>\n"
        ),
    }
}

/// Fragment shown when a tab's feed could not be fetched.
///
/// Gives the user a retry affordance instead of a blank container; the retry
/// control re-invokes the render for the same tab.
pub fn fetch_error_markup(tab_id: &str, message: &str) -> String {
    format!(
        "<div class=\"feed-error\" data-tab=\"{tab}\">\n\
         <p>Couldn't load this feed right now.</p>\n\
         <p class=\"feed-error__detail\">{detail}</p>\n\
         <button class=\"feed-error__retry\" data-retry-tab=\"{tab}\">Try again</button>\n\
         </div>\n",
        tab = encode_double_quoted_attribute(tab_id),
        detail = html_escape::encode_safe(message),
    )
}

/// Minimal page shell the CLI wraps fragments in when writing files.
pub fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"assets/style.css\">\n\
         </head>\n<body>\n{body}</body>\n</html>\n",
        title = html_escape::encode_safe(title),
    )
}
