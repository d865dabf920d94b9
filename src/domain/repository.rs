//! Repository domain model.
//!
//! [`RepositoryItem`] is a single hit returned by the repository search API.
//! The controller treats it as opaque: only `id` and `full_name` are required,
//! the remaining fields are optional display details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A repository matching the current search query.
///
/// Field names follow the GitHub REST payload so items deserialize directly
/// from the `items` array of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryItem {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryItem {
    /// Creates an item with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use reposcout::RepositoryItem;
    ///
    /// let item = RepositoryItem::new(1, "rust-lang/rust");
    /// assert_eq!(item.full_name, "rust-lang/rust");
    /// assert!(item.language.is_none());
    /// ```
    #[must_use]
    pub fn new(id: u64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            description: None,
            stargazers_count: 0,
            language: None,
            updated_at: None,
        }
    }

    /// Returns a short relative description of the last update, if known.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn updated_ago(&self) -> Option<String> {
        self.updated_at.map(|updated| Self::format_ago(Utc::now(), updated))
    }

    fn format_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
        let diff = (now - then).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }

    /// Star count formatted for a narrow column (`1.2k`, `35k`, `812`).
    #[must_use]
    pub fn stars_label(&self) -> String {
        match self.stargazers_count {
            n if n >= 10_000 => format!("{}k", n / 1000),
            n if n >= 1000 => format!("{}.{}k", n / 1000, (n % 1000) / 100),
            n => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn deserializes_github_item_ignoring_unknown_fields() {
        let json = r#"{
            "id": 10270250,
            "full_name": "facebook/react",
            "private": false,
            "stargazers_count": 220000,
            "language": "JavaScript",
            "updated_at": "2024-05-01T10:00:00Z"
        }"#;

        let item: RepositoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 10_270_250);
        assert_eq!(item.full_name, "facebook/react");
        assert_eq!(item.language.as_deref(), Some("JavaScript"));
        assert!(item.description.is_none());
        assert!(item.updated_at.is_some());
    }

    #[test]
    fn missing_optional_fields_default() {
        let item: RepositoryItem =
            serde_json::from_str(r#"{"id": 1, "full_name": "a/b"}"#).unwrap();
        assert_eq!(item, RepositoryItem::new(1, "a/b"));
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(RepositoryItem::format_ago(now, now - Duration::seconds(5)), "just now");
        assert_eq!(RepositoryItem::format_ago(now, now - Duration::minutes(5)), "5m ago");
        assert_eq!(RepositoryItem::format_ago(now, now - Duration::hours(3)), "3h ago");
        assert_eq!(RepositoryItem::format_ago(now, now - Duration::days(7)), "7d ago");
    }

    #[test]
    fn star_labels() {
        let mut item = RepositoryItem::new(1, "a/b");
        item.stargazers_count = 812;
        assert_eq!(item.stars_label(), "812");
        item.stargazers_count = 1234;
        assert_eq!(item.stars_label(), "1.2k");
        item.stargazers_count = 35_400;
        assert_eq!(item.stars_label(), "35k");
    }
}
