use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Maintain the Pulse article store from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an article to the store
    #[command(alias = "new")]
    Add {
        /// Headline text
        title: Vec<String>,
        /// Optional summary text
        #[arg(long)]
        summary: Option<String>,
        /// Optional canonical source URL
        #[arg(long)]
        url: Option<String>,
        /// Creation timestamp override for backfills (RFC 3339)
        #[arg(long, value_name = "TIMESTAMP")]
        created_at: Option<String>,
    },
    /// List recent articles
    List {
        /// Number of articles to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search articles by title and summary
    Search {
        /// Search query
        query: String,
        /// Number of articles to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an existing article
    Delete {
        /// Article ID or unique ID prefix
        id: String,
    },
    /// Remove duplicate articles, keeping the oldest of each group
    Dedupe {
        /// Report what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export articles
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
