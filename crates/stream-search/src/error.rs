use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("invalid url `{input}`: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with HTTP {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl SearchError {
    pub fn invalid_url(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether the error came from the network round trip (as opposed to
    /// building the request).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpStatus { .. } | Self::MalformedResponse { .. }
        )
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        Self::malformed(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
