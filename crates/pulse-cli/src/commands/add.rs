use std::path::Path;

use pulse_core::db::{ArticleRepository, SqliteArticleRepository};
use pulse_core::util::is_http_url;
use pulse_core::Article;

use crate::commands::common::{normalize_title, open_database, parse_created_at};
use crate::error::CliError;

pub fn run_add(
    title_parts: &[String],
    summary: Option<String>,
    url: Option<String>,
    created_at: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let title = normalize_title(title_parts)?;

    if let Some(raw) = url.as_deref() {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && !is_http_url(trimmed) {
            return Err(CliError::InvalidUrl(raw.to_string()));
        }
    }

    let created_at = created_at.map(parse_created_at).transpose()?;

    let mut article = Article::new(title, summary, url);
    if let Some(timestamp) = created_at {
        article.created_at = Some(timestamp);
    }

    let db = open_database(db_path)?;
    let repo = SqliteArticleRepository::new(db.connection());
    repo.insert(&article)?;

    println!("{}", article.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pulse_core::db::{ArticleRepository, SqliteArticleRepository};
    use tempfile::tempdir;

    use super::run_add;
    use crate::commands::common::open_database;
    use crate::error::CliError;

    #[test]
    fn run_add_inserts_article_with_backdated_timestamp() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");

        run_add(
            &["Market".to_string(), "Update".to_string()],
            Some("Stocks up".to_string()),
            Some("http://x.com/a".to_string()),
            Some("1970-01-01T00:00:02Z"),
            &db_path,
        )
        .unwrap();

        let db = open_database(&db_path).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());
        let articles = repo.list_all().unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Market Update");
        assert_eq!(articles[0].created_at, Some(2000));
    }

    #[test]
    fn run_add_rejects_non_http_url() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");

        let error = run_add(
            &["Title".to_string()],
            None,
            Some("ftp://x.com/a".to_string()),
            None,
            &db_path,
        )
        .unwrap_err();

        assert!(matches!(error, CliError::InvalidUrl(_)));
    }

    #[test]
    fn run_add_rejects_empty_title() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");

        let error = run_add(&[], None, None, None, &db_path).unwrap_err();
        assert!(matches!(error, CliError::EmptyTitle));
    }
}
