use serde::Serialize;

use crate::error::Result;
use crate::models::SearchResponsePage;
use crate::request::build_search_url;

/// Results per page requested from the endpoint (`limit=10`).
pub const PAGE_SIZE: u64 = 10;

/// Number of pages shown in the pager for a given result count.
///
/// This is a floor division, so 100 results give 10 pages but 9 results give
/// none at all. The pager is hidden whenever this returns 0.
#[inline]
pub fn total_pages_for(total_result_count: u64) -> u32 {
    u32::try_from(total_result_count / PAGE_SIZE).unwrap_or(u32::MAX)
}

/// Which pager control a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PagerTarget {
    Next,
    Prev,
    Other,
}

impl PagerTarget {
    /// Classifies a click from the target element's `class` attribute.
    pub fn from_class_list(classes: &str) -> Self {
        let mut tokens = classes.split_ascii_whitespace();
        if tokens.clone().any(|c| c == "next") {
            Self::Next
        } else if tokens.any(|c| c == "prev") {
            Self::Prev
        } else {
            Self::Other
        }
    }
}

/// Mutable state of a single search widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub base_url: String,
    pub query: String,
    pub current_url: String,
    pub previous_page_url: String,
    pub next_page_url: String,
    pub total_pages: u32,
    pub current_page: u32,
}

impl SearchState {
    pub fn new(base_url: impl Into<String>, query: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let query = query.into();
        let current_url = build_search_url(&base_url, &query)?.to_string();
        Ok(Self {
            base_url,
            query,
            current_url,
            previous_page_url: String::new(),
            next_page_url: String::new(),
            total_pages: 0,
            current_page: 1,
        })
    }

    pub fn pager_visible(&self) -> bool {
        self.total_pages > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.total_pages
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a click on `target` should trigger a fetch.
    pub fn allows(&self, target: PagerTarget) -> bool {
        match target {
            PagerTarget::Next => self.can_go_next(),
            PagerTarget::Prev => self.can_go_prev(),
            PagerTarget::Other => false,
        }
    }

    /// The server-supplied link for a pager direction, if any.
    pub fn link_for(&self, target: PagerTarget) -> Option<&str> {
        let link = match target {
            PagerTarget::Next => &self.next_page_url,
            PagerTarget::Prev => &self.previous_page_url,
            PagerTarget::Other => return None,
        };
        (!link.is_empty()).then_some(link.as_str())
    }

    /// Moves the counter one page in the given direction.
    pub fn step(&mut self, target: PagerTarget) {
        match target {
            PagerTarget::Next => self.current_page = self.current_page.saturating_add(1),
            PagerTarget::Prev => self.current_page = self.current_page.saturating_sub(1).max(1),
            PagerTarget::Other => {}
        }
    }

    /// Records the totals and links of a freshly fetched page.
    pub fn apply_page(&mut self, page: &SearchResponsePage) {
        self.total_pages = total_pages_for(page.total_result_count);
        self.next_page_url = page.next_page_url.clone().unwrap_or_default();
        self.previous_page_url = page.previous_page_url.clone().unwrap_or_default();
        if self.total_pages > 0 {
            self.current_page = self.current_page.clamp(1, self.total_pages);
        } else {
            self.current_page = 1;
        }
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use rstest::rstest;

    fn page(total: u64, next: Option<&str>, prev: Option<&str>) -> SearchResponsePage {
        SearchResponsePage {
            total_result_count: total,
            items: vec![],
            next_page_url: next.map(str::to_owned),
            previous_page_url: prev.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(0, 0)]
    #[case(9, 0)]
    #[case(10, 1)]
    #[case(95, 9)]
    #[case(100, 10)]
    #[case(101, 10)]
    fn test_total_pages_is_floor(#[case] total: u64, #[case] pages: u32) {
        assert_eq!(total_pages_for(total), pages);
    }

    #[rstest]
    #[case("pager next", PagerTarget::Next)]
    #[case("prev pager", PagerTarget::Prev)]
    #[case("page-counter", PagerTarget::Other)]
    #[case("", PagerTarget::Other)]
    #[case("nextish", PagerTarget::Other)]
    fn test_pager_target_from_classes(#[case] classes: &str, #[case] expected: PagerTarget) {
        assert_eq!(PagerTarget::from_class_list(classes), expected);
    }

    #[test]
    fn test_new_state() {
        let state = SearchState::new(DEFAULT_BASE_URL, "starcraft").unwrap();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 0);
        assert!(!state.pager_visible());
        assert!(state.current_url.ends_with("q=starcraft"));
    }

    #[test]
    fn test_state_machine_bounds() {
        let mut state = SearchState::new(DEFAULT_BASE_URL, "starcraft").unwrap();
        state.apply_page(&page(30, Some("n"), None));
        assert_eq!(state.total_pages, 3);

        assert!(state.can_go_next());
        assert!(!state.can_go_prev());

        state.step(PagerTarget::Next);
        assert!(state.can_go_next());
        assert!(state.can_go_prev());

        state.step(PagerTarget::Next);
        assert_eq!(state.current_page, 3);
        assert!(!state.can_go_next());
        assert!(state.can_go_prev());
        assert!(!state.allows(PagerTarget::Other));
    }

    #[test]
    fn test_every_reachable_page_respects_bounds() {
        for total_pages in 1..=12u32 {
            let mut state = SearchState::new(DEFAULT_BASE_URL, "q").unwrap();
            state.apply_page(&page(u64::from(total_pages) * PAGE_SIZE, None, None));
            for current in 1..=total_pages {
                state.current_page = current;
                assert_eq!(state.can_go_next(), current < total_pages);
                assert_eq!(state.can_go_prev(), current > 1);
            }
        }
    }

    #[test]
    fn test_links_and_clamp() {
        let mut state = SearchState::new(DEFAULT_BASE_URL, "starcraft").unwrap();
        state.current_page = 8;
        state.apply_page(&page(40, Some("https://n"), Some("")));
        assert_eq!(state.current_page, 4);
        assert_eq!(state.link_for(PagerTarget::Next), Some("https://n"));
        assert_eq!(state.link_for(PagerTarget::Prev), None);
        assert_eq!(state.link_for(PagerTarget::Other), None);

        state.apply_page(&page(0, None, None));
        assert_eq!(state.current_page, 1);
        assert!(!state.pager_visible());
    }
}
