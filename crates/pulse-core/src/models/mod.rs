//! Data models for Pulse

mod article;

pub use article::{Article, ArticleId};
