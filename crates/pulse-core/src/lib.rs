//! pulse-core - Core library for Pulse
//!
//! This crate contains the article model, the database layer, and the
//! duplicate resolution logic shared by the Pulse maintenance tools.

pub mod db;
pub mod dedupe;
pub mod error;
pub mod export;
pub mod models;
pub mod util;

pub use error::{Error, Result};
pub use models::{Article, ArticleId};
