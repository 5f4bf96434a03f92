//! Pure transformation from a fetched page to what the widget shows.
//!
//! Nothing here touches a [`Surface`](crate::surface::Surface); the renderer
//! applies these values afterwards.

use serde::Serialize;

use crate::models::{SearchResponsePage, SearchResultItem};
use crate::state::SearchState;

pub const NO_DISPLAY_NAME: &str = "No display name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerView {
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub total_text: String,
    pub search_for_text: String,
    pub pager: Option<PagerView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    /// Empty when the stream has no preview.
    pub image_src: String,
    pub title: String,
    pub status_line: String,
    pub status_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub cards: Vec<ResultCard>,
}

pub fn total_text(total_result_count: u64) -> String {
    format!("Total result: {total_result_count}")
}

pub fn search_for_text(query: &str) -> String {
    format!("Search result for: {query}")
}

/// Builds the summary line. `state` must already reflect `page`.
pub fn summary_view(page: &SearchResponsePage, query: &str, state: &SearchState) -> SummaryView {
    let pager = state.pager_visible().then(|| PagerView {
        current_page: state.current_page,
        total_pages: state.total_pages,
    });
    SummaryView {
        total_text: total_text(page.total_result_count),
        search_for_text: search_for_text(query),
        pager,
    }
}

pub fn result_card(item: &SearchResultItem) -> ResultCard {
    ResultCard {
        image_src: item.thumbnail_url.clone().unwrap_or_default(),
        title: item
            .display_name
            .clone()
            .unwrap_or_else(|| NO_DISPLAY_NAME.to_owned()),
        status_line: format!("{} - {} viewers", item.game, item.viewer_count),
        status_text: item.status_text.clone(),
    }
}

pub fn list_view(page: &SearchResponsePage) -> ListView {
    ListView {
        cards: page.items.iter().map(result_card).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn item(name: Option<&str>, thumb: Option<&str>) -> SearchResultItem {
        SearchResultItem {
            thumbnail_url: thumb.map(str::to_owned),
            display_name: name.map(str::to_owned),
            game: "StarCraft II".to_owned(),
            viewer_count: 42,
            status_text: "ranked".to_owned(),
        }
    }

    #[test]
    fn test_card_fields() {
        let card = result_card(&item(Some("Alpha"), Some("https://img/a.jpg")));
        assert_eq!(card.image_src, "https://img/a.jpg");
        assert_eq!(card.title, "Alpha");
        assert_eq!(card.status_line, "StarCraft II - 42 viewers");
        assert_eq!(card.status_text, "ranked");
    }

    #[test]
    fn test_card_placeholders() {
        let card = result_card(&item(None, None));
        assert_eq!(card.image_src, "");
        assert_eq!(card.title, "No display name");
    }

    #[test]
    fn test_summary_with_and_without_pager() {
        let mut state = SearchState::new(DEFAULT_BASE_URL, "dota 2").unwrap();
        let page = SearchResponsePage {
            total_result_count: 95,
            ..Default::default()
        };
        state.apply_page(&page);
        let summary = summary_view(&page, "dota 2", &state);
        assert_eq!(summary.total_text, "Total result: 95");
        assert_eq!(summary.search_for_text, "Search result for: dota 2");
        assert_eq!(
            summary.pager,
            Some(PagerView {
                current_page: 1,
                total_pages: 9
            })
        );

        let empty = SearchResponsePage::default();
        state.apply_page(&empty);
        let summary = summary_view(&empty, "dota 2", &state);
        assert_eq!(summary.total_text, "Total result: 0");
        assert_eq!(summary.pager, None);
    }

    #[test]
    fn test_list_preserves_order() {
        let page = SearchResponsePage {
            total_result_count: 2,
            items: vec![item(Some("b"), None), item(Some("a"), None)],
            ..Default::default()
        };
        let titles: Vec<_> = list_view(&page).cards.into_iter().map(|c| c.title).collect();
        assert_eq!(titles, ["b", "a"]);
    }
}
