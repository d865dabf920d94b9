//! Search request construction.
//!
//! A [`SearchRequest`] describes one call to the repository search endpoint.
//! The plugin runtime turns it into a host web request; the handler only
//! builds it.

use crate::app::request::RequestTag;
use crate::domain::error::{RepoScoutError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Characters escaped in the `q` parameter: everything but unreserved ones.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// User agent sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = "reposcout-zellij-plugin";

/// Media type for the v3 REST API.
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// One page of a repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub base_url: String,
    pub query: String,
    /// 1-indexed page.
    pub page: u32,
    pub per_page: u32,
    /// Staleness tag returned with the response.
    pub tag: RequestTag,
}

impl SearchRequest {
    /// Builds a request for `tag.query` / `tag.page`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoScoutError::Config`] if the query is empty or the page
    /// is zero; the search endpoint rejects both.
    pub fn new(base_url: &str, per_page: u32, tag: RequestTag) -> Result<Self> {
        if tag.query.is_empty() {
            return Err(RepoScoutError::Config("search query must not be empty".to_string()));
        }
        if tag.page == 0 {
            return Err(RepoScoutError::Config("pages are 1-indexed".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            query: tag.query.clone(),
            page: tag.page,
            per_page,
            tag,
        })
    }

    /// Full request URL.
    ///
    /// ```rust
    /// use reposcout::app::request::{RequestKind, RequestTag};
    /// use reposcout::github::SearchRequest;
    ///
    /// let tag = RequestTag::new(1, "tokio rs", 2, RequestKind::NextPage);
    /// let request = SearchRequest::new("https://api.github.com/", 10, tag)?;
    /// assert_eq!(
    ///     request.url(),
    ///     "https://api.github.com/search/repositories?q=tokio+rs&per_page=10&page=2"
    /// );
    /// # Ok::<(), reposcout::RepoScoutError>(())
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/search/repositories?q={}&per_page={}&page={}",
            self.base_url,
            encode_query(&self.query),
            self.per_page,
            self.page
        )
    }

    /// Headers required by the search API.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        headers.insert("Accept".to_string(), ACCEPT.to_string());
        headers
    }

    /// Context map echoed back by the host with the response.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        self.tag.to_context()
    }
}

/// Percent-encodes a query parameter value, with spaces as `+`.
fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY_ENCODE)
        .to_string()
        .replace("%20", "+")
}
