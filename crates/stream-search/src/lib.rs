//! Live stream search widget core.
//!
//! [`StreamSearchController`] builds request urls, fetches result pages through
//! a [`SearchSource`], tracks pagination in a [`SearchState`] and renders into a
//! [`Surface`]. [`HtmlSurface`] is an in-memory surface that emits the widget
//! markup.
//!
//! ```no_run
//! use std::sync::Arc;
//! use stream_search::{HtmlSurface, HttpSearchSource, SearchConfig, StreamSearchController};
//!
//! # async fn run() -> stream_search::Result<()> {
//! let config = SearchConfig::default();
//! let source = Arc::new(HttpSearchSource::from_config(&config)?);
//! let mut controller = StreamSearchController::new(config, source, HtmlSurface::new())?;
//! controller.init().await;
//! println!("{}", controller.surface().to_html());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod html;
pub mod models;
pub mod render;
pub mod request;
pub mod state;
pub mod surface;
pub mod view;

pub use client::{HttpSearchSource, SearchSource, default_client};
pub use config::SearchConfig;
pub use controller::{FetchKind, IgnoreReason, Outcome, PendingFetch, Prepared, StreamSearchController};
pub use error::{Result, SearchError};
pub use html::HtmlSurface;
pub use models::{SearchResponsePage, SearchResultItem};
pub use state::{PAGE_SIZE, PagerTarget, SearchState, total_pages_for};
pub use surface::{Surface, UiEvent};
pub use view::{ListView, PagerView, ResultCard, SummaryView};
