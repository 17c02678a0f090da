use std::path::Path;

use pulse_core::db::SqliteArticleRepository;
use pulse_core::dedupe::{purge, PurgeReport};

use crate::commands::common::open_database;
use crate::error::CliError;

pub fn run_dedupe(dry_run: bool, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let repo = SqliteArticleRepository::new(db.connection());
    let report = purge(&repo, dry_run)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_report_lines(report: &PurgeReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.passes.len() + 1);

    for pass in &report.passes {
        let removed = if report.dry_run {
            pass.marked
        } else {
            pass.deleted
        };
        lines.push(format!(
            "{:<14}  {} duplicate groups  {} removed",
            pass.pass.label(),
            pass.duplicate_groups,
            removed
        ));
    }

    let verb = if report.dry_run { "would be removed" } else { "removed" };
    lines.push(format!(
        "{} of {} articles {verb} ({} remain)",
        report.total_removed, report.initial_count, report.final_count
    ));

    lines
}

#[cfg(test)]
mod tests {
    use pulse_core::db::{ArticleRepository, SqliteArticleRepository};
    use pulse_core::Article;
    use tempfile::tempdir;

    use super::{format_report_lines, run_dedupe};
    use crate::commands::common::open_database;

    fn seed(db_path: &std::path::Path) {
        let db = open_database(db_path).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());

        for (title, created_at) in [("Same story", 1), ("same story", 2), ("Other", 3)] {
            let mut article = Article::new(title, None, None);
            article.created_at = Some(created_at);
            repo.insert(&article).unwrap();
        }
    }

    #[test]
    fn run_dedupe_removes_duplicates_from_store() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");
        seed(&db_path);

        run_dedupe(false, false, &db_path).unwrap();

        let db = open_database(&db_path).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn run_dedupe_dry_run_leaves_store_untouched() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");
        seed(&db_path);

        run_dedupe(true, true, &db_path).unwrap();

        let db = open_database(&db_path).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn format_report_lines_includes_summary_row() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("pulse.db");
        seed(&db_path);

        let db = open_database(&db_path).unwrap();
        let repo = SqliteArticleRepository::new(db.connection());
        let report = pulse_core::dedupe::purge(&repo, false).unwrap();

        let lines = format_report_lines(&report);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("title"));
        assert_eq!(lines[3], "1 of 3 articles removed (2 remain)");
    }
}
