use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw search payload as returned by the kraken search endpoint.
///
/// Only `_total` and `streams` are required; everything inside a stream entry
/// may be absent or `null`.
#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    #[serde(rename = "_total")]
    pub total: u64,
    #[serde(rename = "_links", default)]
    pub links: Option<ResponseLinks>,
    pub streams: Vec<StreamEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseLinks {
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamEntry {
    pub preview: Option<StreamPreview>,
    pub channel: Option<StreamChannel>,
    pub game: Option<String>,
    pub viewers: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamPreview {
    pub medium: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamChannel {
    pub display_name: Option<String>,
    pub status: Option<String>,
}

/// One live stream in a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub thumbnail_url: Option<String>,
    pub display_name: Option<String>,
    pub game: String,
    pub viewer_count: u64,
    pub status_text: String,
}

/// A single fetched page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponsePage {
    pub total_result_count: u64,
    pub items: Vec<SearchResultItem>,
    pub next_page_url: Option<String>,
    pub previous_page_url: Option<String>,
}

impl SearchResponsePage {
    /// Parses a raw response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: StreamsResponse = serde_json::from_str(body)?;
        Ok(response.into())
    }
}

impl From<StreamEntry> for SearchResultItem {
    fn from(entry: StreamEntry) -> Self {
        let channel = entry.channel.unwrap_or_default();
        Self {
            thumbnail_url: entry.preview.and_then(|p| p.medium).filter(|s| !s.is_empty()),
            display_name: channel.display_name.filter(|s| !s.is_empty()),
            game: entry.game.unwrap_or_default(),
            viewer_count: entry.viewers.unwrap_or_default(),
            status_text: channel.status.unwrap_or_default(),
        }
    }
}

impl From<StreamsResponse> for SearchResponsePage {
    fn from(response: StreamsResponse) -> Self {
        let links = response.links.unwrap_or_default();
        Self {
            total_result_count: response.total,
            items: response.streams.into_iter().map(Into::into).collect(),
            next_page_url: links.next.filter(|s| !s.is_empty()),
            previous_page_url: links.prev.filter(|s| !s.is_empty()),
        }
    }
}
