use url::Url;

use crate::error::{Result, SearchError};

const CLIENT_ID_PARAM: &str = "client_id";

/// Returns `true` if the query would produce a fresh search.
#[inline]
pub fn is_searchable(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Builds `<base_url><query>` with the query percent-encoded.
pub fn build_search_url(base_url: &str, query: &str) -> Result<Url> {
    if !is_searchable(query) {
        return Err(SearchError::EmptyQuery);
    }
    let raw = format!("{base_url}{}", urlencoding::encode(query));
    Url::parse(&raw).map_err(|e| SearchError::invalid_url(raw, e))
}

/// Appends the `client_id` parameter unless the url already carries one.
pub fn with_client_id(mut url: Url, client_id: &str) -> Url {
    if client_id.is_empty() || url.query_pairs().any(|(key, _)| key == CLIENT_ID_PARAM) {
        return url;
    }
    url.query_pairs_mut().append_pair(CLIENT_ID_PARAM, client_id);
    url
}

/// Produces the fully-qualified request url.
///
/// `override_url` is a server-supplied pagination link; when present it is
/// used instead of the base url and query.
pub fn resolve_request_url(
    base_url: &str,
    query: &str,
    override_url: Option<&str>,
    client_id: &str,
) -> Result<Url> {
    let url = match override_url {
        Some(link) => Url::parse(link).map_err(|e| SearchError::invalid_url(link, e))?,
        None => build_search_url(base_url, query)?,
    };
    Ok(with_client_id(url, client_id))
}
