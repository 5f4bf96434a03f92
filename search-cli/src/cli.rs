use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stream-search", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Override the search endpoint (the query is appended to it)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the client identifier sent with every request
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search live streams and print one page of results
    Search {
        /// Search query (defaults to the configured default query)
        query: Option<String>,

        /// Page to show; `next` links are followed to reach it
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Browse results interactively
    #[cfg(feature = "interactive")]
    Browse {
        /// Initial search query
        query: Option<String>,
    },

    /// Show or reset the configuration
    Config {
        /// Print the current configuration
        #[arg(long)]
        show: bool,

        /// Reset the configuration to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human readable, coloured when enabled
    #[default]
    Pretty,
    /// Tabular listing of the result cards
    Table,
    /// Pretty printed JSON
    Json,
    /// Widget markup
    Html,
}
