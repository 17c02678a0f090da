//! Shared article export helpers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Article;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable article representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArticle {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    pub created_at: Option<i64>,
}

/// Convert an article into an export record.
#[must_use]
pub fn article_to_export_item(article: &Article) -> ExportArticle {
    ExportArticle {
        id: article.id.to_string(),
        title: article.title.clone(),
        summary: article.summary.clone(),
        source_url: article.source_url.clone(),
        created_at: article.created_at,
    }
}

/// Render articles as pretty-printed JSON.
pub fn render_json_export(articles: &[Article]) -> serde_json::Result<String> {
    let items = articles
        .iter()
        .map(article_to_export_item)
        .collect::<Vec<ExportArticle>>();
    serde_json::to_string_pretty(&items)
}

/// Render articles in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(articles: &[Article]) -> String {
    let mut output = String::new();

    for (index, article) in articles.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let item = article_to_export_item(article);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", item.id);
        if let Some(created_at) = item.created_at {
            let _ = writeln!(output, "created_at: {created_at}");
        }
        if let Some(source_url) = &item.source_url {
            let _ = writeln!(output, "source_url: {source_url}");
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", item.title);
        if let Some(summary) = &item.summary {
            let _ = writeln!(output);
            output.push_str(summary);
            output.push('\n');
        }
    }

    output
}

/// Render articles based on selected export format.
pub fn render_articles_export(
    articles: &[Article],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(articles),
        ExportFormat::Markdown => Ok(render_markdown_export(articles)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("pulse-export-{timestamp_ms}.{}", format.extension())
}
