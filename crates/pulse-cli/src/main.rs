//! Pulse CLI - Maintenance tooling for the Pulse article store
//!
//! Ingest, inspect, deduplicate, and export articles from the terminal.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
use commands::common::resolve_db_path;
use error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pulse_core=info".parse().unwrap())
                .add_directive("pulse_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Add {
            title,
            summary,
            url,
            created_at,
        }) => {
            commands::add::run_add(&title, summary, url, created_at.as_deref(), &db_path)?;
        }
        Some(Commands::List { limit, json }) => {
            commands::list::run_list(limit, json, &db_path)?;
        }
        Some(Commands::Search { query, limit, json }) => {
            commands::search::run_search(&query, limit, json, &db_path)?;
        }
        Some(Commands::Delete { id }) => commands::delete::run_delete(&id, &db_path)?,
        Some(Commands::Dedupe { dry_run, json }) => {
            commands::dedupe::run_dedupe(dry_run, json, &db_path)?;
        }
        Some(Commands::Export { format, output }) => {
            commands::export::run_export(format, output.as_deref(), &db_path)?;
        }
        Some(Commands::Completions { shell, output }) => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
