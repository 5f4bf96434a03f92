use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::client::SearchSource;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::models::SearchResponsePage;
use crate::render::{render_list, render_summary};
use crate::request::{build_search_url, is_searchable, with_client_id};
use crate::state::{PagerTarget, SearchState};
use crate::surface::{Surface, UiEvent};

/// Why an interaction did not lead to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyQuery,
    /// The pager direction is not allowed at the current page.
    OutOfRange,
    /// The direction is allowed but the last response carried no link for it.
    NoPagerLink,
    /// A click inside the pagination area that hit neither link.
    OtherClick,
}

#[derive(Debug)]
pub enum Outcome {
    Rendered { page: u32, total_pages: u32 },
    Ignored(IgnoreReason),
    /// A newer request was issued before this one completed.
    Stale { seq: u64 },
    Failed(SearchError),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    Search,
    Page(PagerTarget),
}

/// A request that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub seq: u64,
    pub kind: FetchKind,
    /// Request url including the client identifier.
    pub url: Url,
    query: String,
    location: String,
}

#[derive(Debug)]
pub enum Prepared {
    Fetch(PendingFetch),
    Done(Outcome),
}

/// Drives one search widget: owns its state and writes into its surface.
pub struct StreamSearchController<S> {
    config: SearchConfig,
    source: Arc<dyn SearchSource>,
    surface: S,
    state: SearchState,
    issued: u64,
    /// Sequence of the last fetch `complete` accepted.
    applied: u64,
}

impl<S: Surface> StreamSearchController<S> {
    pub fn new(config: SearchConfig, source: Arc<dyn SearchSource>, surface: S) -> Result<Self> {
        let state = SearchState::new(config.base_url.as_str(), config.default_query.as_str())?;
        Ok(Self {
            config,
            source,
            surface,
            state,
            issued: 0,
            applied: 0,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn source(&self) -> Arc<dyn SearchSource> {
        Arc::clone(&self.source)
    }

    /// Loads the configured default query on page 1, as done once when the
    /// widget appears.
    pub async fn init(&mut self) -> Outcome {
        let prepared = self.prepare_initial();
        self.run(prepared).await
    }

    pub async fn handle_event(&mut self, event: UiEvent) -> Outcome {
        let prepared = self.prepare(event);
        self.run(prepared).await
    }

    pub async fn handle_search(&mut self) -> Outcome {
        self.handle_event(UiEvent::Search).await
    }

    pub async fn handle_pagination(&mut self, target: PagerTarget) -> Outcome {
        self.handle_event(UiEvent::PagerClick(target)).await
    }

    async fn run(&mut self, prepared: Prepared) -> Outcome {
        match prepared {
            Prepared::Done(outcome) => outcome,
            Prepared::Fetch(pending) => {
                let result = self.source.fetch(&pending.url).await;
                self.complete(pending, result)
            }
        }
    }

    pub fn prepare_initial(&mut self) -> Prepared {
        let query = self.config.default_query.clone();
        let url = match build_search_url(&self.state.base_url, &query) {
            Ok(url) => url,
            Err(e) => return Prepared::Done(self.fail(e)),
        };
        let location = url.to_string();
        Prepared::Fetch(self.issue(FetchKind::Initial, url, query, location))
    }

    /// First half of an interaction: decides whether to fetch and what.
    pub fn prepare(&mut self, event: UiEvent) -> Prepared {
        match event {
            UiEvent::Search => self.prepare_search(),
            UiEvent::PagerClick(target) => self.prepare_page(target),
        }
    }

    fn prepare_search(&mut self) -> Prepared {
        let query = self.surface.search_input();
        if !is_searchable(&query) {
            debug!("ignoring search with blank query");
            return Prepared::Done(Outcome::Ignored(IgnoreReason::EmptyQuery));
        }
        let url = match build_search_url(&self.state.base_url, &query) {
            Ok(url) => url,
            Err(e) => return Prepared::Done(self.fail(e)),
        };
        let location = url.to_string();
        Prepared::Fetch(self.issue(FetchKind::Search, url, query, location))
    }

    fn prepare_page(&mut self, target: PagerTarget) -> Prepared {
        if target == PagerTarget::Other {
            return Prepared::Done(Outcome::Ignored(IgnoreReason::OtherClick));
        }
        if !self.state.allows(target) {
            debug!(
                "ignoring {:?} at page {}/{}",
                target, self.state.current_page, self.state.total_pages
            );
            return Prepared::Done(Outcome::Ignored(IgnoreReason::OutOfRange));
        }
        let Some(link) = self.state.link_for(target).map(str::to_owned) else {
            warn!("no {:?} link in the last response", target);
            return Prepared::Done(Outcome::Ignored(IgnoreReason::NoPagerLink));
        };
        let url = match Url::parse(&link) {
            Ok(url) => url,
            Err(e) => return Prepared::Done(self.fail(SearchError::invalid_url(link, e))),
        };
        let query = self.state.query.clone();
        Prepared::Fetch(self.issue(FetchKind::Page(target), url, query, link))
    }

    fn issue(&mut self, kind: FetchKind, url: Url, query: String, location: String) -> PendingFetch {
        self.issued += 1;
        let url = with_client_id(url, &self.config.client_id);
        debug!("issuing request #{} ({:?}): {}", self.issued, kind, url);
        PendingFetch {
            seq: self.issued,
            kind,
            url,
            query,
            location,
        }
    }

    /// Second half of an interaction: applies a fetch result.
    ///
    /// Results of any request older than the most recently issued one, or of
    /// a request that was already completed, are dropped without touching
    /// state or surface.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        result: Result<SearchResponsePage>,
    ) -> Outcome {
        if pending.seq < self.issued || pending.seq <= self.applied {
            debug!(
                "dropping stale response #{} (latest is #{}, applied #{})",
                pending.seq, self.issued, self.applied
            );
            return Outcome::Stale { seq: pending.seq };
        }
        self.applied = pending.seq;

        let page = match result {
            Ok(page) => page,
            Err(e) => return self.fail(e),
        };

        self.state.query = pending.query;
        self.state.current_url = pending.location;
        match pending.kind {
            FetchKind::Initial | FetchKind::Search => self.state.reset_page(),
            FetchKind::Page(target) => self.state.step(target),
        }
        self.state.apply_page(&page);

        self.surface.clear_notice();
        render_summary(&mut self.surface, &page, &self.state.query, &self.state);
        render_list(&mut self.surface, &page);

        info!(
            "rendered {} of {} results for '{}' (page {}/{})",
            page.items.len(),
            page.total_result_count,
            self.state.query,
            self.state.current_page,
            self.state.total_pages
        );
        Outcome::Rendered {
            page: self.state.current_page,
            total_pages: self.state.total_pages,
        }
    }

    fn fail(&mut self, error: SearchError) -> Outcome {
        if error.is_fetch_error() {
            warn!("search request failed: {}", error);
            self.surface.show_notice(&format!("Search failed: {error}"));
        } else {
            warn!("could not build search request: {}", error);
            self.surface.show_notice(&format!("Invalid search: {error}"));
        }
        Outcome::Failed(error)
    }
}
