use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::surface::Surface;
use crate::view::{PagerView, ResultCard};

pub const RESULT_LIST_ID: &str = "streamList";
pub const SEARCH_INPUT_ID: &str = "searchStreamInput";
pub const SEARCH_BUTTON_ID: &str = "searchStreamBtn";

/// In-memory rendition of the widget's containers.
///
/// Content is kept as escaped markup so [`HtmlSurface::to_html`] can emit the
/// whole widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    search_input: String,
    total_count: String,
    search_for: String,
    pagination: String,
    results: Vec<String>,
    notice: Option<String>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into the search field.
    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.search_input = value.into();
    }

    pub fn total_count(&self) -> &str {
        &self.total_count
    }

    pub fn search_for(&self) -> &str {
        &self.search_for
    }

    pub fn pagination_html(&self) -> &str {
        &self.pagination
    }

    pub fn result_items(&self) -> &[String] {
        &self.results
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The text of the page counter, if the pager is shown.
    pub fn page_counter(&self) -> Option<u32> {
        let start = self.pagination.find(r#"<span class="page-counter">"#)?;
        let rest = &self.pagination[start + r#"<span class="page-counter">"#.len()..];
        rest.split('<').next()?.parse().ok()
    }

    pub fn pager_markup(pager: &PagerView) -> String {
        format!(
            concat!(
                r#"<a href="javascript:void(0)" class="pager prev">prev</a>"#,
                r#"<span class="page-counter">{}</span>"#,
                r#"<span>/ {}</span>"#,
                r#"<a href="javascript:void(0)" class="pager next">next</a>"#,
            ),
            pager.current_page, pager.total_pages
        )
    }

    pub fn card_markup(card: &ResultCard) -> String {
        format!(
            concat!(
                "<li><article>",
                r#"<div><img src="{}"></div>"#,
                "<div><h2>{}</h2><p>{}</p><p>{}</p></div>",
                "</article></li>",
            ),
            encode_double_quoted_attribute(&card.image_src),
            encode_text(&card.title),
            encode_text(&card.status_line),
            encode_text(&card.status_text),
        )
    }

    /// Serialises the whole widget.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"stream-search\">\n");
        out.push_str(&format!(
            "  <input id=\"{SEARCH_INPUT_ID}\" type=\"text\" value=\"{}\">\n",
            encode_double_quoted_attribute(&self.search_input)
        ));
        out.push_str(&format!(
            "  <button id=\"{SEARCH_BUTTON_ID}\">Search</button>\n"
        ));
        if let Some(notice) = &self.notice {
            out.push_str(&format!(
                "  <p class=\"notice\">{}</p>\n",
                encode_text(notice)
            ));
        }
        out.push_str(&format!(
            "  <p class=\"total-count\">{}</p>\n",
            encode_text(&self.total_count)
        ));
        out.push_str(&format!(
            "  <p class=\"search-for\">{}</p>\n",
            encode_text(&self.search_for)
        ));
        out.push_str(&format!(
            "  <div class=\"pagination\">{}</div>\n",
            self.pagination
        ));
        out.push_str(&format!("  <ul id=\"{RESULT_LIST_ID}\">\n"));
        for item in &self.results {
            out.push_str("    ");
            out.push_str(item);
            out.push('\n');
        }
        out.push_str("  </ul>\n</div>\n");
        out
    }
}

impl Surface for HtmlSurface {
    fn search_input(&self) -> String {
        self.search_input.clone()
    }

    fn set_total_count(&mut self, text: &str) {
        self.total_count = text.to_owned();
    }

    fn set_search_label(&mut self, text: &str) {
        self.search_for = text.to_owned();
    }

    fn set_pagination(&mut self, pager: Option<&PagerView>) {
        self.pagination = pager.map(Self::pager_markup).unwrap_or_default();
    }

    fn clear_results(&mut self) {
        self.results.clear();
    }

    fn append_result(&mut self, card: &ResultCard) {
        self.results.push(Self::card_markup(card));
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_owned());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, src: &str) -> ResultCard {
        ResultCard {
            image_src: src.to_owned(),
            title: title.to_owned(),
            status_line: "StarCraft II - 7 viewers".to_owned(),
            status_text: "grandmaster ladder".to_owned(),
        }
    }

    #[test]
    fn test_card_markup_structure() {
        let html = HtmlSurface::card_markup(&card("Alpha", "https://img/a.jpg"));
        assert_eq!(
            html,
            "<li><article><div><img src=\"https://img/a.jpg\"></div>\
             <div><h2>Alpha</h2><p>StarCraft II - 7 viewers</p><p>grandmaster ladder</p></div>\
             </article></li>"
        );
    }

    #[test]
    fn test_missing_thumbnail_gives_empty_src() {
        let html = HtmlSurface::card_markup(&card("No display name", ""));
        assert!(html.contains(r#"<img src="">"#));
        assert!(html.contains("<h2>No display name</h2>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = HtmlSurface::card_markup(&card("<b>x</b>", "a\"b"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("a\"b"));
    }

    #[test]
    fn test_pager_markup() {
        let mut surface = HtmlSurface::new();
        surface.set_pagination(Some(&PagerView {
            current_page: 3,
            total_pages: 9,
        }));
        assert!(surface.pagination_html().contains("class=\"pager prev\""));
        assert!(surface.pagination_html().contains("<span>/ 9</span>"));
        assert_eq!(surface.page_counter(), Some(3));

        surface.set_pagination(None);
        assert_eq!(surface.pagination_html(), "");
        assert_eq!(surface.page_counter(), None);
    }

    #[test]
    fn test_document_contains_containers() {
        let mut surface = HtmlSurface::new();
        surface.set_search_input("dota");
        surface.set_total_count("Total result: 1");
        surface.append_result(&card("Alpha", ""));
        surface.show_notice("offline");

        let doc = surface.to_html();
        assert!(doc.contains(r#"<input id="searchStreamInput" type="text" value="dota">"#));
        assert!(doc.contains(r#"<p class="total-count">Total result: 1</p>"#));
        assert!(doc.contains(r#"<ul id="streamList">"#));
        assert!(doc.contains(r#"<p class="notice">offline</p>"#));

        surface.clear_notice();
        assert!(!surface.to_html().contains("notice"));
    }
}
