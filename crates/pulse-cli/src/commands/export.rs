use std::path::Path;

use pulse_core::export::{render_json_export, render_markdown_export};

use crate::cli::ExportFormat;
use crate::commands::common::list_all_articles;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    db_path: &Path,
) -> Result<(), CliError> {
    let articles = list_all_articles(db_path)?;
    let rendered = match format {
        ExportFormat::Json => render_json_export(&articles)?,
        ExportFormat::Markdown => render_markdown_export(&articles),
    };

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
