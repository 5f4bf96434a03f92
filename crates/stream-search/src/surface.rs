use crate::state::PagerTarget;
use crate::view::{PagerView, ResultCard};

/// The containers a search widget writes into.
///
/// Implementors own creation and styling of the containers; the controller
/// only replaces their content and reads the search input.
pub trait Surface {
    /// Current value of the search input field.
    fn search_input(&self) -> String;

    fn set_total_count(&mut self, text: &str);

    fn set_search_label(&mut self, text: &str);

    /// Replaces the pagination area; `None` empties it.
    fn set_pagination(&mut self, pager: Option<&PagerView>);

    fn clear_results(&mut self);

    fn append_result(&mut self, card: &ResultCard);

    /// Shows a non-fatal message, e.g. after a failed fetch.
    fn show_notice(&mut self, _message: &str) {}

    /// Removes a notice left by an earlier failure.
    fn clear_notice(&mut self) {}
}

/// User interactions the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The search button was pressed.
    Search,
    /// Something inside the pagination area was clicked.
    PagerClick(PagerTarget),
}
