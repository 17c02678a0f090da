use std::path::Path;

use pulse_core::db::{ArticleRepository, SqliteArticleRepository};

use crate::commands::common::{normalize_article_identifier, open_database, resolve_article};
use crate::error::CliError;

pub fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_article_identifier(id)?;
    let db = open_database(db_path)?;
    let article = resolve_article(&normalized_id, &db)?;

    let repo = SqliteArticleRepository::new(db.connection());
    repo.delete(&article.id)?;
    println!("{}", article.id);
    Ok(())
}
