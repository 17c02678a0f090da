//! Database layer for Pulse

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{ArticleRepository, SqliteArticleRepository};
