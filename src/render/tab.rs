//! Tab page fragment: header, featured, fresh, and paginated sections.

use chrono::{DateTime, Datelike, Utc};
use html_escape::encode_double_quoted_attribute;

use crate::present::CardView;
use crate::render::cards_markup;

/// The seven fixed header captions, Monday first.
pub const DAY_CAPTIONS: [&str; 7] = [
    "Fresh for Monday",
    "The Tuesday round-up",
    "Midweek digest",
    "The Thursday brief",
    "Friday wrap-up",
    "Weekend reading",
    "The Sunday shelf",
];

/// Caption for the given instant's day of week.
pub fn day_caption(now: DateTime<Utc>) -> &'static str {
    DAY_CAPTIONS[now.weekday().num_days_from_monday() as usize]
}

/// Presented sections of one tab, ready for markup composition.
pub struct TabSections<'a> {
    pub featured: &'a [CardView],
    pub fresh: &'a [CardView],
    /// First page of the remaining bucket (already revealed).
    pub first_page: &'a [CardView],
    /// Whether unrevealed remaining articles exist (load-more affordance).
    pub has_more: bool,
}

/// Compose a tab's full fragment.
///
/// The date-themed header renders only when `caption` is given (the main
/// tab); the fresh section is omitted when empty; the load-more control is
/// omitted when the remaining bucket fits one page.
pub fn tab_markup(tab_id: &str, sections: &TabSections<'_>, caption: Option<&str>) -> String {
    let tab_attr = encode_double_quoted_attribute(tab_id);
    let mut html = format!("<div class=\"tab-panel\" data-tab=\"{tab_attr}\">\n");

    if let Some(caption) = caption {
        html.push_str(&format!(
            "<header class=\"tab-header\"><h2>{}</h2></header>\n",
            html_escape::encode_safe(caption)
        ));
    }

    if sections.featured.is_empty() {
        html.push_str("<p class=\"tab-empty\">Nothing on the menu yet. Check back soon.</p>\n");
    } else {
        html.push_str("<section class=\"featured\">\n");
        html.push_str(&cards_markup(sections.featured, true));
        html.push_str("</section>\n");
    }

    if !sections.fresh.is_empty() {
        html.push_str("<section class=\"fresh\">\n<h3>Fresh</h3>\n");
        html.push_str(&cards_markup(sections.fresh, false));
        html.push_str("</section>\n");
    }

    if !sections.first_page.is_empty() {
        html.push_str("<section class=\"more\" data-more-tab=\"");
        html.push_str(&tab_attr);
        html.push_str("\">\n");
        html.push_str(&cards_markup(sections.first_page, false));
        html.push_str("</section>\n");
        if sections.has_more {
            html.push_str(&format!(
                "<button class=\"load-more\" data-load-tab=\"{tab_attr}\">Load more</button>\n"
            ));
        }
    }

    html.push_str("</div>\n");
    html
}
