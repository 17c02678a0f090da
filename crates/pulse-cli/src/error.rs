use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] pulse_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No article title provided")]
    EmptyTitle,
    #[error("Article ID cannot be empty")]
    EmptyArticleId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Article not found for id/prefix: {0}")]
    ArticleNotFound(String),
    #[error("{0}")]
    AmbiguousArticleId(String),
    #[error("Source URL must include http:// or https://: {0}")]
    InvalidUrl(String),
    #[error("Invalid RFC 3339 timestamp: {0}")]
    InvalidTimestamp(String),
}
