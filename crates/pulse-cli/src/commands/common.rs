use std::env;
use std::path::{Path, PathBuf};

use chrono::Utc;
use pulse_core::db::{ArticleRepository, Database, SqliteArticleRepository};
use pulse_core::{Article, ArticleId};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ArticleListItem {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    pub created_at: Option<i64>,
    pub relative_time: Option<String>,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("PULSE_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pulse")
        .join("pulse.db")
}

pub fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::debug!("Opening article database at {}", path.display());
    Ok(Database::open(path)?)
}

pub fn list_articles(limit: usize, db_path: &Path) -> Result<Vec<Article>, CliError> {
    let db = open_database(db_path)?;
    let repo = SqliteArticleRepository::new(db.connection());
    Ok(repo.list(limit, 0)?)
}

pub fn list_all_articles(db_path: &Path) -> Result<Vec<Article>, CliError> {
    let db = open_database(db_path)?;
    let repo = SqliteArticleRepository::new(db.connection());
    Ok(repo.list_all()?)
}

pub fn search_articles(query: &str, limit: usize, db_path: &Path) -> Result<Vec<Article>, CliError> {
    let db = open_database(db_path)?;
    let repo = SqliteArticleRepository::new(db.connection());
    Ok(repo.search(query, limit)?)
}

pub fn resolve_article(article_query: &str, db: &Database) -> Result<Article, CliError> {
    let repo = SqliteArticleRepository::new(db.connection());

    if let Ok(article_id) = article_query.parse::<ArticleId>() {
        if let Some(article) = repo.get(&article_id)? {
            return Ok(article);
        }
    }

    let matching_ids = repo.list_ids_by_prefix(article_query, 3)?;

    match matching_ids.len() {
        0 => Err(CliError::ArticleNotFound(article_query.to_string())),
        1 => {
            let resolved_id = matching_ids[0]
                .parse::<ArticleId>()
                .map_err(|_| CliError::ArticleNotFound(article_query.to_string()))?;
            repo.get(&resolved_id)?
                .ok_or_else(|| CliError::ArticleNotFound(article_query.to_string()))
        }
        _ => {
            let options = matching_ids
                .iter()
                .take(3)
                .map(|id| id.chars().take(13).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousArticleId(format!(
                "ID prefix '{article_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_article_lines(articles: &[Article]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    articles
        .iter()
        .map(|article| {
            let id = article.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let title = title_preview(article, 40);
            let age = article.created_at.map_or_else(
                || "undated".to_string(),
                |created_at| format_relative_time(created_at, now_ms),
            );

            match &article.source_url {
                Some(url) => format!("{short_id:<13}  {title:<40}  {age:<10}  {url}"),
                None => format!("{short_id:<13}  {title:<40}  {age}"),
            }
        })
        .collect()
}

pub fn article_to_list_item(article: &Article) -> ArticleListItem {
    let now_ms = Utc::now().timestamp_millis();

    ArticleListItem {
        id: article.id.to_string(),
        title: article.title.clone(),
        summary: article.summary.clone(),
        source_url: article.source_url.clone(),
        created_at: article.created_at,
        relative_time: article
            .created_at
            .map(|created_at| format_relative_time(created_at, now_ms)),
    }
}

pub fn title_preview(article: &Article, max_chars: usize) -> String {
    let collapsed = article
        .title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn normalize_title(title_parts: &[String]) -> Result<String, CliError> {
    let joined = title_parts.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyTitle)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_article_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyArticleId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn parse_created_at(raw: &str) -> Result<i64, CliError> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.timestamp_millis())
        .map_err(|_| CliError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use pulse_core::db::{ArticleRepository, SqliteArticleRepository};
    use pulse_core::Article;
    use tempfile::tempdir;

    use super::{
        format_relative_time, normalize_article_identifier, normalize_search_query,
        normalize_title, open_database, parse_created_at, resolve_article, title_preview,
        CliError,
    };

    #[test]
    fn normalize_title_trims_and_rejects_empty() {
        assert_eq!(
            normalize_title(&["  Market".to_string(), "Update  ".to_string()]).unwrap(),
            "Market Update"
        );
        assert!(matches!(
            normalize_title(&[" \n\t ".to_string()]),
            Err(CliError::EmptyTitle)
        ));
    }

    #[test]
    fn normalize_search_query_rejects_empty() {
        assert!(normalize_search_query(" \n\t ").is_err());
        assert_eq!(
            normalize_search_query("  exact phrase  ").unwrap(),
            "exact phrase"
        );
    }

    #[test]
    fn normalize_article_identifier_rejects_empty() {
        assert!(matches!(
            normalize_article_identifier(" \n "),
            Err(CliError::EmptyArticleId)
        ));
        assert_eq!(
            normalize_article_identifier("  abc123  ").unwrap(),
            "abc123".to_string()
        );
    }

    #[test]
    fn parse_created_at_accepts_rfc3339() {
        assert_eq!(parse_created_at("1970-01-01T00:00:01Z").unwrap(), 1000);
        assert!(matches!(
            parse_created_at("yesterday"),
            Err(CliError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn format_relative_time_units() {
        let now = 10_000_000;
        assert_eq!(format_relative_time(now - 30_000, now), "just now");
        assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
        assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    }

    #[test]
    fn title_preview_truncates_with_ellipsis() {
        let article = Article::new(
            "This is a very long headline that should be shortened",
            None,
            None,
        );
        let preview = title_preview(&article, 20);
        assert_eq!(preview, "This is a very lo...");
    }

    #[test]
    fn resolve_article_supports_exact_and_prefix_id() {
        let tmp = tempdir().unwrap();
        let db = open_database(&tmp.path().join("pulse.db")).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());

        let mut left = Article::new("Left", None, None);
        left.id = "11111111-1111-7111-8111-111111111111".parse().unwrap();
        let mut right = Article::new("Right", None, None);
        right.id = "11111111-1111-7111-8111-222222222222".parse().unwrap();
        repo.insert(&left).unwrap();
        repo.insert(&right).unwrap();

        let by_exact = resolve_article("11111111-1111-7111-8111-111111111111", &db).unwrap();
        assert_eq!(by_exact.title, "Left");

        let by_prefix = resolve_article("11111111-1111-7111-8111-2", &db).unwrap();
        assert_eq!(by_prefix.title, "Right");
    }

    #[test]
    fn resolve_article_rejects_ambiguous_prefix() {
        let tmp = tempdir().unwrap();
        let db = open_database(&tmp.path().join("pulse.db")).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());

        let mut left = Article::new("Left", None, None);
        left.id = "aaaaaaaa-aaaa-7aaa-8aaa-aaaaaaaaaaaa".parse().unwrap();
        let mut right = Article::new("Right", None, None);
        right.id = "aaaaaaaa-aaaa-7aaa-8aaa-bbbbbbbbbbbb".parse().unwrap();
        repo.insert(&left).unwrap();
        repo.insert(&right).unwrap();

        let error = resolve_article("aaaaaaaa-aaaa-7aaa-8aaa", &db).unwrap_err();
        assert!(matches!(error, CliError::AmbiguousArticleId(_)));
    }

    #[test]
    fn resolve_article_rejects_missing_article() {
        let tmp = tempdir().unwrap();
        let db = open_database(&tmp.path().join("pulse.db")).unwrap();

        let error = resolve_article("does-not-exist", &db).unwrap_err();
        assert!(matches!(error, CliError::ArticleNotFound(_)));
    }
}
