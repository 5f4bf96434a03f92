use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::models::SearchResponsePage;

const KRAKEN_ACCEPT: &str = "application/vnd.twitchtv.v5+json";

/// Something that can turn a request url into a page of results.
///
/// Every call is a single independent attempt: no retries, no coalescing of
/// concurrent calls.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<SearchResponsePage>;
}

pub fn default_client(config: &SearchConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(KRAKEN_ACCEPT));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .build()
        .map_err(SearchError::from)
}

/// [`SearchSource`] backed by a plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSearchSource {
    client: Client,
}

impl HttpSearchSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Ok(Self::new(default_client(config)?))
    }
}

#[async_trait]
impl SearchSource for HttpSearchSource {
    async fn fetch(&self, url: &Url) -> Result<SearchResponsePage> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("body: {}", body);
        SearchResponsePage::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn search_handler(Query(params): Query<HashMap<String, String>>) -> String {
        let q = params.get("q").cloned().unwrap_or_default();
        let client_id = params.get("client_id").cloned().unwrap_or_default();
        serde_json::json!({
            "_total": 23,
            "_links": { "next": "http://localhost/next" },
            "streams": [{
                "game": q,
                "viewers": 3,
                "channel": { "display_name": client_id, "status": "live" },
                "preview": { "medium": "http://localhost/p.jpg" }
            }]
        })
        .to_string()
    }

    async fn spawn_server() -> String {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let app = Router::new()
            .route("/search", get(search_handler))
            .route("/broken", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }))
            .route("/html", get(|| async { "<html>not json</html>" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn source() -> HttpSearchSource {
        // local test server, keep ambient proxy settings out of the way
        HttpSearchSource::new(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn test_default_client_builds() {
        assert!(HttpSearchSource::from_config(&SearchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_parses_payload() {
        let base = spawn_server().await;
        let url = crate::request::resolve_request_url(
            &format!("{base}/search?limit=10&q="),
            "star craft",
            None,
            "cid",
        )
        .unwrap();

        let page = source().fetch(&url).await.unwrap();
        assert_eq!(page.total_result_count, 23);
        assert_eq!(page.next_page_url.as_deref(), Some("http://localhost/next"));
        assert_eq!(page.items[0].game, "star craft");
        assert_eq!(page.items[0].display_name.as_deref(), Some("cid"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let base = spawn_server().await;
        let url = Url::parse(&format!("{base}/broken")).unwrap();
        let err = source().fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::HttpStatus { status, .. } if status == StatusCode::BAD_GATEWAY
        ));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let base = spawn_server().await;
        let url = Url::parse(&format!("{base}/html")).unwrap();
        let err = source().fetch(&url).await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/search")).unwrap();
        let err = source().fetch(&url).await.unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}
