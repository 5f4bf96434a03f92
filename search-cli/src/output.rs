use crate::{cli::OutputFormat, error::Result};
#[cfg(feature = "colored-output")]
use colored::*;
use serde::Serialize;
use std::io::Write;
use stream_search::{
    HtmlSurface, ListView, PagerView, ResultCard, Surface, SummaryView,
    render::{apply_list, apply_summary},
};
#[cfg(feature = "table-output")]
use tabled::{Table, Tabled, settings::Style};

/// Everything the widget currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub total_text: String,
    pub search_for_text: String,
    pub pager: Option<PagerView>,
    pub cards: Vec<ResultCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Surface that keeps the rendered widget in memory until it is printed.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    input: String,
    snapshot: Snapshot,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Surface for TerminalSurface {
    fn search_input(&self) -> String {
        self.input.clone()
    }

    fn set_total_count(&mut self, text: &str) {
        self.snapshot.total_text = text.to_owned();
    }

    fn set_search_label(&mut self, text: &str) {
        self.snapshot.search_for_text = text.to_owned();
    }

    fn set_pagination(&mut self, pager: Option<&PagerView>) {
        self.snapshot.pager = pager.cloned();
    }

    fn clear_results(&mut self) {
        self.snapshot.cards.clear();
    }

    fn append_result(&mut self, card: &ResultCard) {
        self.snapshot.cards.push(card.clone());
    }

    fn show_notice(&mut self, message: &str) {
        self.snapshot.notice = Some(message.to_owned());
    }

    fn clear_notice(&mut self) {
        self.snapshot.notice = None;
    }
}

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_snapshot(&self, snapshot: &Snapshot, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(snapshot)),
            #[cfg(feature = "table-output")]
            OutputFormat::Table => Ok(self.format_table(snapshot)),
            #[cfg(not(feature = "table-output"))]
            OutputFormat::Table => {
                // Fallback to pretty format when table feature is disabled
                Ok(self.format_pretty(snapshot))
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(snapshot)?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Html => Ok(Self::format_html(snapshot)),
        }
    }

    fn format_pretty(&self, snapshot: &Snapshot) -> String {
        let mut output = String::new();

        if let Some(notice) = &snapshot.notice {
            output.push_str(&self.colorize(notice, &Color::Red, true));
            output.push('\n');
        }
        output.push_str(&self.colorize(&snapshot.total_text, &Color::Green, true));
        output.push('\n');
        output.push_str(&self.colorize(&snapshot.search_for_text, &Color::Green, false));
        output.push_str("\n\n");

        for (index, card) in snapshot.cards.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {}\n",
                index + 1,
                self.colorize(&card.title, &Color::Cyan, true)
            ));
            output.push_str(&format!(
                "     {}\n",
                self.colorize(&card.status_line, &Color::Yellow, false)
            ));
            if !card.status_text.is_empty() {
                output.push_str(&format!("     {}\n", card.status_text));
            }
            if !card.image_src.is_empty() {
                output.push_str(&format!(
                    "     {}\n",
                    self.colorize(&card.image_src, &Color::Blue, false)
                ));
            }
        }

        if let Some(pager) = &snapshot.pager {
            output.push('\n');
            output.push_str(&Self::pager_line(pager));
            output.push('\n');
        }
        output
    }

    pub fn pager_line(pager: &PagerView) -> String {
        format!("prev  {} / {}  next", pager.current_page, pager.total_pages)
    }

    #[cfg(feature = "table-output")]
    fn format_table(&self, snapshot: &Snapshot) -> String {
        #[derive(Tabled)]
        struct CardRow<'a> {
            #[tabled(rename = "#")]
            index: usize,
            #[tabled(rename = "Channel")]
            title: &'a str,
            #[tabled(rename = "Game / viewers")]
            status_line: &'a str,
            #[tabled(rename = "Status")]
            status_text: &'a str,
        }

        let rows = snapshot.cards.iter().enumerate().map(|(i, card)| CardRow {
            index: i + 1,
            title: &card.title,
            status_line: &card.status_line,
            status_text: &card.status_text,
        });

        let mut output = format!("{}\n{}\n", snapshot.total_text, snapshot.search_for_text);
        if let Some(notice) = &snapshot.notice {
            output.push_str(notice);
            output.push('\n');
        }
        output.push_str(&Table::new(rows).with(Style::modern()).to_string());
        output.push('\n');
        if let Some(pager) = &snapshot.pager {
            output.push_str(&Self::pager_line(pager));
            output.push('\n');
        }
        output
    }

    fn format_html(snapshot: &Snapshot) -> String {
        let mut surface = HtmlSurface::new();
        apply_summary(
            &mut surface,
            &SummaryView {
                total_text: snapshot.total_text.clone(),
                search_for_text: snapshot.search_for_text.clone(),
                pager: snapshot.pager.clone(),
            },
        );
        apply_list(
            &mut surface,
            &ListView {
                cards: snapshot.cards.clone(),
            },
        );
        if let Some(notice) = &snapshot.notice {
            surface.show_notice(notice);
        }
        surface.to_html()
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Blue => text.blue(),
                    Color::Cyan => text.cyan(),
                    Color::Red => text.red(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (color, bold, self.colored);
            text.to_string()
        }
    }
}

enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
    Red,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}
