use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::Result,
    output::{OutputManager, TerminalSurface, write_output},
};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::{path::Path, sync::Arc, time::Duration};
use stream_search::{
    HttpSearchSource, Outcome, PagerTarget, SearchResponsePage, SearchSource,
    StreamSearchController,
};
use tracing::{info, warn};
use url::Url;

/// Wraps a source with a terminal spinner shown while a request is in flight.
pub struct ProgressSource {
    inner: Arc<dyn SearchSource>,
    enabled: bool,
}

impl ProgressSource {
    pub fn new(inner: Arc<dyn SearchSource>, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_strings(&[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ]));
        }
        pb.set_message("Searching streams...");
        Some(pb)
    }
}

#[async_trait]
impl SearchSource for ProgressSource {
    async fn fetch(&self, url: &Url) -> stream_search::Result<SearchResponsePage> {
        let pb = self.spinner();
        let result = self.inner.fetch(url).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        result
    }
}

pub struct CommandExecutor {
    config: AppConfig,
    output: OutputManager,
    show_progress: bool,
    /// Overrides the HTTP source built from the config.
    source: Option<Arc<dyn SearchSource>>,
}

impl CommandExecutor {
    pub fn new(config: AppConfig, show_progress: bool) -> Self {
        let output = OutputManager::new(config.colored);
        Self {
            config,
            output,
            show_progress,
            source: None,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn SearchSource>) -> Self {
        self.source = Some(source);
        self
    }

    fn controller(
        &self,
        query: Option<&str>,
        show_progress: bool,
    ) -> Result<StreamSearchController<TerminalSurface>> {
        let mut search_config = self.config.search.clone();
        if let Some(query) = query {
            search_config.default_query = query.to_string();
        }
        let inner: Arc<dyn SearchSource> = match &self.source {
            Some(source) => Arc::clone(source),
            None => Arc::new(HttpSearchSource::from_config(&search_config)?),
        };
        let source = Arc::new(ProgressSource::new(inner, show_progress));
        Ok(StreamSearchController::new(
            search_config,
            source,
            TerminalSurface::new(),
        )?)
    }

    /// Runs one query and prints the requested page.
    pub async fn search(
        &self,
        query: Option<&str>,
        page: u32,
        format: Option<OutputFormat>,
        output_file: Option<&Path>,
    ) -> Result<()> {
        let format = format.unwrap_or(self.config.output_format);
        let show_progress = self.show_progress && output_file.is_none();
        let controller = self.load_page(query, page, show_progress).await?;

        let content = self
            .output
            .format_snapshot(controller.surface().snapshot(), &format)?;
        write_output(&content, output_file)?;
        if let Some(path) = output_file {
            info!("results written to {}", path.display());
        }
        Ok(())
    }

    /// Loads the first page and follows `next` links until `page` is reached
    /// or the pager cannot go further.
    async fn load_page(
        &self,
        query: Option<&str>,
        page: u32,
        show_progress: bool,
    ) -> Result<StreamSearchController<TerminalSurface>> {
        let mut controller = self.controller(query, show_progress)?;

        if let Outcome::Failed(e) = controller.init().await {
            return Err(e.into());
        }

        while controller.state().current_page < page {
            match controller.handle_pagination(PagerTarget::Next).await {
                Outcome::Rendered { .. } => {}
                Outcome::Failed(e) => return Err(e.into()),
                other => {
                    warn!(
                        "stopped at page {} of {}: {:?}",
                        controller.state().current_page,
                        controller.state().total_pages,
                        other
                    );
                    break;
                }
            }
        }
        Ok(controller)
    }

    /// Interactive loop: each choice becomes a widget event.
    #[cfg(feature = "interactive")]
    pub async fn browse(&self, query: Option<&str>) -> Result<()> {
        use inquire::{Select, Text};
        use stream_search::{IgnoreReason, UiEvent};

        const NEXT: &str = "Next page";
        const PREV: &str = "Previous page";
        const SEARCH: &str = "New search";
        const QUIT: &str = "Quit";

        let mut controller = self.controller(query, self.show_progress)?;
        controller.init().await;

        loop {
            let content = self
                .output
                .format_snapshot(controller.surface().snapshot(), &OutputFormat::Pretty)?;
            write_output(&content, None)?;

            let state = controller.state();
            let mut options = Vec::with_capacity(4);
            if state.can_go_next() {
                options.push(NEXT);
            }
            if state.can_go_prev() {
                options.push(PREV);
            }
            options.push(SEARCH);
            options.push(QUIT);

            let event = match Select::new("What next?", options).prompt()? {
                NEXT => UiEvent::PagerClick(PagerTarget::Next),
                PREV => UiEvent::PagerClick(PagerTarget::Prev),
                SEARCH => {
                    let input = Text::new("Search streams:").prompt()?;
                    controller.surface_mut().set_input(input);
                    UiEvent::Search
                }
                _ => break,
            };

            if let Outcome::Ignored(IgnoreReason::EmptyQuery) = controller.handle_event(event).await {
                println!("Nothing to search for.");
            }
            println!();
        }
        Ok(())
    }
}
