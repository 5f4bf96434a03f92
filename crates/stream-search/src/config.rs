use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.twitch.tv/kraken/search/streams?limit=10&q=";
pub const DEFAULT_CLIENT_ID: &str = "2wqd84jzctpguefwja1mlf660g5e7a";
pub const DEFAULT_QUERY: &str = "starcraft";
pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Settings shared by the controller and the HTTP source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Endpoint prefix; the query is appended verbatim (after encoding).
    pub base_url: String,

    /// Static identifier the remote API uses to attribute requests.
    pub client_id: String,

    /// Query issued on the initial load.
    pub default_query: String,

    /// User agent string
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            default_query: DEFAULT_QUERY.to_owned(),
            user_agent: DEFAULT_UA.to_owned(),
        }
    }
}

impl SearchConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = query.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_kraken_search() {
        let config = SearchConfig::default();
        assert!(config.base_url.ends_with("limit=10&q="));
        assert_eq!(config.default_query, "starcraft");
        assert!(!config.client_id.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"default_query":"dota"}"#).unwrap();
        assert_eq!(config.default_query, "dota");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
