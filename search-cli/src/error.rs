use stream_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[cfg(feature = "interactive")]
    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}

pub type Result<T> = std::result::Result<T, CliError>;
