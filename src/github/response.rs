//! Search response decoding.
//!
//! Converts the host's raw `(status, body)` pair into either a page of
//! [`RepositoryItem`]s or a network error message. Everything that is not a
//! 2xx answer with a decodable body is a network error from the controller's
//! point of view.

use crate::domain::error::{RepoScoutError, Result};
use crate::domain::RepositoryItem;
use serde::Deserialize;

/// Body of a successful `/search/repositories` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<RepositoryItem>,
}

/// Longest plain-text error body carried into the message, in characters.
const MAX_TEXT_DETAIL: usize = 200;

/// Error body returned by the API on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Decodes one page of search results.
///
/// # Errors
///
/// - [`RepoScoutError::Network`] for non-2xx statuses. The message carries the
///   status and the API's own `message` field, or failing that a plain-text
///   body (host transport errors arrive this way). Markup bodies are dropped.
/// - [`RepoScoutError::Decode`] if a 2xx body is not a search response.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<RepositoryItem>> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_slice::<ApiErrorBody>(body)
            .map(|e| e.message)
            .ok()
            .or_else(|| text_detail(body))
            .filter(|m| !m.is_empty());

        return Err(RepoScoutError::Network(match detail {
            Some(message) => format!("GitHub API error ({status}): {message}"),
            None => format!("GitHub API error ({status})"),
        }));
    }

    let response: SearchResponse = serde_json::from_slice(body)?;

    tracing::debug!(
        total_count = response.total_count,
        incomplete = response.incomplete_results,
        page_items = response.items.len(),
        "search response decoded"
    );

    Ok(response.items)
}

/// A non-JSON body as a one-line message, if it is readable text.
fn text_detail(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() || text.starts_with('<') || text.starts_with('{') {
        return None;
    }

    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > MAX_TEXT_DETAIL {
        let cut: String = line.chars().take(MAX_TEXT_DETAIL).collect();
        Some(format!("{cut}..."))
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_items_in_order() {
        let body = br#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"id": 1, "full_name": "facebook/react"},
                {"id": 2, "full_name": "vercel/next.js", "language": "JavaScript"}
            ]
        }"#;

        let items = decode_response(200, body).unwrap();
        let names: Vec<_> = items.iter().map(|i| i.full_name.as_str()).collect();
        assert_eq!(names, ["facebook/react", "vercel/next.js"]);
    }

    #[test]
    fn empty_page_is_ok() {
        let items = decode_response(200, br#"{"total_count": 0, "items": []}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn api_error_message_is_surfaced() {
        let body = br#"{"message": "API rate limit exceeded", "documentation_url": "https://docs.github.com"}"#;
        let err = decode_response(403, body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Network error: GitHub API error (403): API rate limit exceeded"
        );
    }

    #[test]
    fn opaque_error_body_falls_back_to_status() {
        let err = decode_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, RepoScoutError::Network(ref m) if m == "GitHub API error (502)"));
    }

    #[test]
    fn plain_text_error_body_is_kept() {
        let err = decode_response(400, b"error sending request: connection refused\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Network error: GitHub API error (400): error sending request: connection refused"
        );
    }

    #[test]
    fn long_text_error_body_is_truncated() {
        let body = "x".repeat(500);
        let err = decode_response(500, body.as_bytes()).unwrap_err();
        let RepoScoutError::Network(message) = err else {
            panic!("expected network error");
        };
        assert!(message.ends_with("..."));
        assert_eq!(message.len(), "GitHub API error (500): ".len() + MAX_TEXT_DETAIL + 3);
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = decode_response(200, b"{\"items\": 3}").unwrap_err();
        assert!(matches!(err, RepoScoutError::Decode(_)));
    }
}
