use std::path::Path;

use crate::commands::common::{
    article_to_list_item, format_article_lines, normalize_search_query, search_articles,
    ArticleListItem,
};
use crate::error::CliError;

pub fn run_search(
    query: &str,
    limit: usize,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    let articles = search_articles(&normalized_query, limit, db_path)?;

    if as_json {
        let json_items = articles
            .iter()
            .map(article_to_list_item)
            .collect::<Vec<ArticleListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_article_lines(&articles) {
            println!("{line}");
        }
    }

    Ok(())
}
