//! Per-tab pagination cursors over the remaining tier.

use std::collections::HashMap;
use std::ops::Range;

/// Articles revealed per load-more step.
pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy)]
struct Cursor {
    total: usize,
    revealed: usize,
}

/// Tracks how much of each tab's remaining tier has been revealed.
///
/// Cursors are independent per tab id; advancing one never touches another.
#[derive(Debug, Default)]
pub struct Pagination {
    cursors: HashMap<String, Cursor>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a tab's cursor and reveal the first page.
    ///
    /// Returns how many articles are revealed after initialization, which is
    /// the whole tier when it fits within one page.
    pub fn initialize(&mut self, tab_id: &str, total: usize, page_size: usize) -> usize {
        let revealed = total.min(page_size);
        self.cursors
            .insert(tab_id.to_string(), Cursor { total, revealed });
        revealed
    }

    /// Reveal the next page, returning the newly revealed index range.
    ///
    /// An uninitialized or exhausted cursor yields an empty range, so calling
    /// past the end stays a no-op.
    pub fn reveal(&mut self, tab_id: &str, page_size: usize) -> Range<usize> {
        let Some(cursor) = self.cursors.get_mut(tab_id) else {
            return 0..0;
        };
        let start = cursor.revealed;
        let end = cursor.total.min(start + page_size);
        cursor.revealed = end;
        start..end
    }

    /// How many of the tab's articles are currently revealed.
    pub fn revealed(&self, tab_id: &str) -> usize {
        self.cursors.get(tab_id).map_or(0, |c| c.revealed)
    }

    /// Whether the tab has unrevealed articles left.
    pub fn has_more(&self, tab_id: &str) -> bool {
        self.cursors
            .get(tab_id)
            .is_some_and(|c| c.revealed < c.total)
    }

    /// Drop every cursor.
    pub fn clear(&mut self) {
        self.cursors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_reveals_first_page() {
        let mut pagination = Pagination::new();
        assert_eq!(pagination.initialize("main", 30, PAGE_SIZE), 12);
        assert_eq!(pagination.revealed("main"), 12);
        assert!(pagination.has_more("main"));
    }

    #[test]
    fn test_initialize_short_tier_reveals_everything() {
        let mut pagination = Pagination::new();
        assert_eq!(pagination.initialize("main", 5, PAGE_SIZE), 5);
        assert!(!pagination.has_more("main"));
    }

    #[test]
    fn test_reveal_walks_pages_then_stops() {
        let mut pagination = Pagination::new();
        pagination.initialize("main", 30, PAGE_SIZE);

        assert_eq!(pagination.reveal("main", PAGE_SIZE), 12..24);
        assert!(pagination.has_more("main"));
        assert_eq!(pagination.reveal("main", PAGE_SIZE), 24..30);
        assert!(!pagination.has_more("main"));

        // Exhausted: empty range, and stays that way
        assert_eq!(pagination.reveal("main", PAGE_SIZE), 30..30);
        assert_eq!(pagination.reveal("main", PAGE_SIZE), 30..30);
        assert_eq!(pagination.revealed("main"), 30);
    }

    #[test]
    fn test_reveal_without_initialize_is_empty() {
        let mut pagination = Pagination::new();
        assert!(pagination.reveal("ghost", PAGE_SIZE).is_empty());
        assert!(!pagination.has_more("ghost"));
        assert_eq!(pagination.revealed("ghost"), 0);
    }

    #[test]
    fn test_tabs_are_independent() {
        let mut pagination = Pagination::new();
        pagination.initialize("main", 30, PAGE_SIZE);
        pagination.initialize("adobe", 20, PAGE_SIZE);

        pagination.reveal("main", PAGE_SIZE);
        assert_eq!(pagination.revealed("main"), 24);
        assert_eq!(pagination.revealed("adobe"), 12);
    }

    #[test]
    fn test_reinitialize_resets_cursor() {
        let mut pagination = Pagination::new();
        pagination.initialize("main", 30, PAGE_SIZE);
        pagination.reveal("main", PAGE_SIZE);
        pagination.initialize("main", 18, PAGE_SIZE);
        assert_eq!(pagination.revealed("main"), 12);
        assert!(pagination.has_more("main"));
    }

    #[test]
    fn test_clear_drops_all_cursors() {
        let mut pagination = Pagination::new();
        pagination.initialize("main", 30, PAGE_SIZE);
        pagination.clear();
        assert_eq!(pagination.revealed("main"), 0);
        assert!(pagination.reveal("main", PAGE_SIZE).is_empty());
    }
}
