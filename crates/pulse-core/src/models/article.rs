//! Article model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::normalize_text_option;

/// A unique identifier for an article, using UUID v7 (time-sortable)
///
/// The `Ord` impl is part of the public contract: when two duplicate
/// records carry the same `created_at`, the lowest id wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Create a new unique article ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArticleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A news article in the store
///
/// `created_at` is optional because the upstream ingester has written rows
/// without a timestamp; such rows are tolerated but never participate in
/// duplicate grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: ArticleId,
    /// Headline text
    pub title: String,
    /// Optional summary/abstract
    pub summary: Option<String>,
    /// Optional canonical source URL
    pub source_url: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: Option<i64>,
}

impl Article {
    /// Create a new article with the given fields
    ///
    /// Blank summaries and source URLs are normalized to `None`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        summary: Option<String>,
        source_url: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: ArticleId::new(),
            title: title.into().trim().to_string(),
            summary: normalize_text_option(summary),
            source_url: normalize_text_option(source_url),
            created_at: Some(now),
        }
    }

    /// Check if the headline is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_untitled(&self) -> bool {
        self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_article_id_unique() {
        let id1 = ArticleId::new();
        let id2 = ArticleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_article_id_parse() {
        let id = ArticleId::new();
        let parsed: ArticleId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_article_id_ordering_matches_string_form() {
        let lo: ArticleId = "11111111-1111-7111-8111-111111111111".parse().unwrap();
        let hi: ArticleId = "11111111-1111-7111-8111-222222222222".parse().unwrap();
        assert!(lo < hi);
    }

    #[test]
    fn test_article_new() {
        let article = Article::new("Market Update", Some("Stocks up".to_string()), None);
        assert_eq!(article.title, "Market Update");
        assert_eq!(article.summary.as_deref(), Some("Stocks up"));
        assert_eq!(article.source_url, None);
        assert!(article.created_at.unwrap() > 0);
    }

    #[test]
    fn test_article_new_normalizes_blank_fields() {
        let article = Article::new(
            "  Spaced title  ",
            Some("   ".to_string()),
            Some(String::new()),
        );
        assert_eq!(article.title, "Spaced title");
        assert_eq!(article.summary, None);
        assert_eq!(article.source_url, None);
    }

    #[test]
    fn test_is_untitled() {
        let blank = Article::new("   ", None, None);
        assert!(blank.is_untitled());

        let titled = Article::new("Hello", None, None);
        assert!(!titled.is_untitled());
    }
}
