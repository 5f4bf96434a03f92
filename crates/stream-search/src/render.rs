use tracing::debug;

use crate::models::SearchResponsePage;
use crate::state::SearchState;
use crate::surface::Surface;
use crate::view::{ListView, SummaryView, list_view, summary_view};

/// Writes the total count, the query label and the pager.
pub fn render_summary<S: Surface + ?Sized>(
    surface: &mut S,
    page: &SearchResponsePage,
    query: &str,
    state: &SearchState,
) -> SummaryView {
    let summary = summary_view(page, query, state);
    apply_summary(surface, &summary);
    summary
}

pub fn apply_summary<S: Surface + ?Sized>(surface: &mut S, summary: &SummaryView) {
    surface.set_total_count(&summary.total_text);
    surface.set_search_label(&summary.search_for_text);
    surface.set_pagination(summary.pager.as_ref());
}

/// Replaces the result list with the items of `page`.
pub fn render_list<S: Surface + ?Sized>(surface: &mut S, page: &SearchResponsePage) -> ListView {
    let list = list_view(page);
    apply_list(surface, &list);
    list
}

pub fn apply_list<S: Surface + ?Sized>(surface: &mut S, list: &ListView) {
    surface.clear_results();
    for card in &list.cards {
        surface.append_result(card);
    }
    debug!("rendered {} result cards", list.cards.len());
}
