//! Article repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT/OFFSET

use crate::error::{Error, Result};
use crate::models::{Article, ArticleId};
use rusqlite::{params, params_from_iter, Connection};

/// Upper bound on bound variables per DELETE statement
const DELETE_CHUNK_SIZE: usize = 500;

/// Trait for article storage operations
pub trait ArticleRepository {
    /// Create a new article from its fields
    fn create(
        &self,
        title: &str,
        summary: Option<String>,
        source_url: Option<String>,
    ) -> Result<Article>;

    /// Insert a fully-specified record (backfills and tests)
    fn insert(&self, article: &Article) -> Result<()>;

    /// Get an article by ID
    fn get(&self, id: &ArticleId) -> Result<Option<Article>>;

    /// List articles, newest first
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Article>>;

    /// Bulk-read the full article set, oldest first
    fn list_all(&self) -> Result<Vec<Article>>;

    /// Count all articles
    fn count(&self) -> Result<usize>;

    /// Search articles by title/summary using FTS
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>>;

    /// List article ids matching an id prefix
    fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>>;

    /// Delete a single article
    fn delete(&self, id: &ArticleId) -> Result<()>;

    /// Bulk-delete by id; returns the number of rows actually removed
    fn delete_many(&self, ids: &[ArticleId]) -> Result<usize>;
}

/// `SQLite` implementation of `ArticleRepository`
pub struct SqliteArticleRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteArticleRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an article from a database row
    fn parse_article(row: &rusqlite::Row<'_>) -> rusqlite::Result<Article> {
        let id: String = row.get(0)?;
        Ok(Article {
            id: id.parse().unwrap_or_default(),
            title: row.get(1)?,
            summary: row.get(2)?,
            source_url: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create(
        &self,
        title: &str,
        summary: Option<String>,
        source_url: Option<String>,
    ) -> Result<Article> {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput("Article title is required".into()));
        }

        let article = Article::new(title, summary, source_url);
        self.insert(&article)?;
        Ok(article)
    }

    fn insert(&self, article: &Article) -> Result<()> {
        self.conn.execute(
            "INSERT INTO articles (id, title, summary, source_url, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                article.id.as_str(),
                article.title,
                article.summary,
                article.source_url,
                article.created_at
            ],
        )?;

        Ok(())
    }

    fn get(&self, id: &ArticleId) -> Result<Option<Article>> {
        let result = self.conn.query_row(
            "SELECT id, title, summary, source_url, created_at FROM articles WHERE id = ?",
            params![id.as_str()],
            Self::parse_article,
        );

        match result {
            Ok(article) => Ok(Some(article)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Article>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, summary, source_url, created_at
             FROM articles
             ORDER BY created_at IS NULL, created_at DESC, id
             LIMIT ? OFFSET ?",
        )?;

        let articles = stmt
            .query_map(params![limit as i64, offset as i64], Self::parse_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(articles)
    }

    fn list_all(&self) -> Result<Vec<Article>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, summary, source_url, created_at
             FROM articles
             ORDER BY created_at IS NULL DESC, created_at, id",
        )?;

        let articles = stmt
            .query_map([], Self::parse_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(articles)
    }

    fn count(&self) -> Result<usize> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count)
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        if query.trim().is_empty() {
            return self.list(limit, 0);
        }

        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.title, a.summary, a.source_url, a.created_at
             FROM articles a
             JOIN articles_fts fts ON a.rowid = fts.rowid
             WHERE articles_fts MATCH ?
             ORDER BY rank
             LIMIT ?",
        )?;

        let articles = stmt
            .query_map(params![query, limit as i64], Self::parse_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(articles)
    }

    fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT id
             FROM articles
             WHERE id LIKE ?
             ORDER BY id
             LIMIT ?",
        )?;

        let ids = stmt
            .query_map(params![format!("{prefix}%"), limit as i64], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ids)
    }

    fn delete(&self, id: &ArticleId) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM articles WHERE id = ?",
            params![id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn delete_many(&self, ids: &[ArticleId]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0usize;

        for chunk in ids.chunks(DELETE_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("DELETE FROM articles WHERE id IN ({placeholders})");
            deleted += tx.execute(&sql, params_from_iter(chunk.iter().map(ArticleId::as_str)))?;
        }

        tx.commit()?;
        Ok(deleted)
    }
}
