//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate_v1(conn)?;
    }
    if version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    // Check if schema_version table exists
    let exists: i32 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if exists == 0 {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Apply a migration batch, rolling back on failure
fn apply(conn: &Connection, batch: &str) -> Result<()> {
    if let Err(error) = conn.execute_batch(batch) {
        let _ = conn.execute_batch("ROLLBACK");
        return Err(error.into());
    }
    Ok(())
}

/// Migration to version 1: Initial schema
fn migrate_v1(conn: &Connection) -> Result<()> {
    apply(
        conn,
        "BEGIN;
         -- Schema version tracking
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY
         );
         -- Articles table; created_at is nullable because the upstream
         -- ingester has produced rows without a timestamp
         CREATE TABLE IF NOT EXISTS articles (
             id TEXT PRIMARY KEY,
             title TEXT NOT NULL,
             summary TEXT,
             source_url TEXT,
             created_at INTEGER
         );
         CREATE INDEX IF NOT EXISTS idx_articles_created ON articles(created_at DESC);
         CREATE INDEX IF NOT EXISTS idx_articles_source_url ON articles(source_url);
         -- Record migration version
         INSERT INTO schema_version (version) VALUES (1);
         COMMIT;",
    )?;

    tracing::info!("Migrated database to version 1");
    Ok(())
}

/// Migration to version 2: Full-text search over title and summary
fn migrate_v2(conn: &Connection) -> Result<()> {
    apply(
        conn,
        "BEGIN;
         CREATE VIRTUAL TABLE IF NOT EXISTS articles_fts USING fts5(
             title,
             summary,
             content=articles,
             content_rowid=rowid
         );
         -- Triggers to keep FTS in sync
         CREATE TRIGGER IF NOT EXISTS articles_ai AFTER INSERT ON articles BEGIN
             INSERT INTO articles_fts(rowid, title, summary)
             VALUES (NEW.rowid, NEW.title, coalesce(NEW.summary, ''));
         END;
         CREATE TRIGGER IF NOT EXISTS articles_ad AFTER DELETE ON articles BEGIN
             INSERT INTO articles_fts(articles_fts, rowid, title, summary)
             VALUES ('delete', OLD.rowid, OLD.title, coalesce(OLD.summary, ''));
         END;
         CREATE TRIGGER IF NOT EXISTS articles_au AFTER UPDATE ON articles BEGIN
             INSERT INTO articles_fts(articles_fts, rowid, title, summary)
             VALUES ('delete', OLD.rowid, OLD.title, coalesce(OLD.summary, ''));
             INSERT INTO articles_fts(rowid, title, summary)
             VALUES (NEW.rowid, NEW.title, coalesce(NEW.summary, ''));
         END;
         INSERT INTO schema_version (version) VALUES (2);
         COMMIT;",
    )?;

    tracing::info!("Migrated database to version {CURRENT_VERSION}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_migrations() {
        let conn = setup();
        run(&conn).unwrap();

        let version = get_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = setup();
        run(&conn).unwrap();
        run(&conn).unwrap(); // Should not fail

        let version = get_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_migration_v2_creates_fts_table() {
        let conn = setup();
        run(&conn).unwrap();

        let exists: i32 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master
                    WHERE type = 'table' AND name = 'articles_fts'
                )",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(exists, 1);
    }

    #[test]
    fn test_fts_triggers_follow_deletes() {
        let conn = setup();
        run(&conn).unwrap();

        conn.execute(
            "INSERT INTO articles (id, title, summary, created_at)
             VALUES ('a', 'Rates rise again', 'Central bank news', 1)",
            [],
        )
        .unwrap();

        let hits: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM articles_fts WHERE articles_fts MATCH 'rates'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(hits, 1);

        conn.execute("DELETE FROM articles WHERE id = 'a'", []).unwrap();

        let hits: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM articles_fts WHERE articles_fts MATCH 'rates'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(hits, 0);
    }
}
