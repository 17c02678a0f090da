//! Duplicate article resolution
//!
//! Articles ingested from overlapping feeds arrive as near-identical
//! records. [`resolve`] partitions a snapshot of the store into survivors
//! and removals across three sequential passes; [`purge`] applies a
//! resolution to the store.

mod purge;

pub use purge::{purge, PassReport, PurgeReport};

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Article, ArticleId};

/// One grouping pass of the resolver, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupePass {
    Title,
    SourceUrl,
    TitleSummary,
}

impl DedupePass {
    /// All passes, in the order they run
    pub const ALL: [Self; 3] = [Self::Title, Self::SourceUrl, Self::TitleSummary];

    /// Human-readable pass name for progress reporting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SourceUrl => "source url",
            Self::TitleSummary => "title+summary",
        }
    }
}

/// Result of a single pass over the surviving set
#[derive(Debug, Clone, Serialize)]
pub struct PassOutcome {
    /// Which pass produced this outcome
    pub pass: DedupePass,
    /// Number of groups that contained more than one record
    pub duplicate_groups: usize,
    /// Ids marked for removal, in ascending id order
    pub removed: Vec<ArticleId>,
}

/// Full partition decision over one snapshot
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Ids that survive all three passes
    pub kept: HashSet<ArticleId>,
    /// Union of ids removed across all passes
    pub removed: HashSet<ArticleId>,
    /// Per-pass breakdown, in execution order
    pub passes: Vec<PassOutcome>,
}

impl Resolution {
    /// Total number of ids marked for removal
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Partition a snapshot of articles into survivors and removals.
///
/// Three passes run in order — title, source URL, title+summary — and each
/// pass only sees records that survived the previous one. Within a group,
/// the earliest `created_at` wins; identical timestamps fall back to the
/// lowest id. Records without a `created_at` are unsortable: they are
/// excluded from grouping and always survive.
#[must_use]
pub fn resolve(articles: &[Article]) -> Resolution {
    let mut kept: HashSet<ArticleId> = articles
        .iter()
        .filter(|article| article.created_at.is_none())
        .map(|article| article.id)
        .collect();

    let mut survivors: Vec<&Article> = articles
        .iter()
        .filter(|article| article.created_at.is_some())
        .collect();

    let mut removed = HashSet::new();
    let mut passes = Vec::with_capacity(DedupePass::ALL.len());

    for pass in DedupePass::ALL {
        let outcome = run_pass(pass, &survivors);
        let removed_here: HashSet<ArticleId> = outcome.removed.iter().copied().collect();
        survivors.retain(|article| !removed_here.contains(&article.id));
        removed.extend(removed_here);
        passes.push(outcome);
    }

    kept.extend(survivors.iter().map(|article| article.id));

    Resolution {
        kept,
        removed,
        passes,
    }
}

type GroupKey = (String, String);

fn run_pass(pass: DedupePass, survivors: &[&Article]) -> PassOutcome {
    let mut groups: HashMap<GroupKey, Vec<&Article>> = HashMap::new();
    for article in survivors {
        if let Some(key) = group_key(pass, article) {
            groups.entry(key).or_default().push(article);
        }
    }

    let mut duplicate_groups = 0;
    let mut removed = Vec::new();

    for mut members in groups.into_values() {
        if members.len() < 2 {
            continue;
        }
        duplicate_groups += 1;
        members.sort_by_key(|article| (article.created_at, article.id));
        removed.extend(members.iter().skip(1).map(|article| article.id));
    }

    removed.sort_unstable();

    PassOutcome {
        pass,
        duplicate_groups,
        removed,
    }
}

/// Grouping key for one article under one pass.
///
/// Returns `None` when the article does not participate in the pass (the
/// URL pass skips records with a blank or absent `source_url`).
fn group_key(pass: DedupePass, article: &Article) -> Option<GroupKey> {
    match pass {
        DedupePass::Title => Some((article.title.to_lowercase(), String::new())),
        DedupePass::SourceUrl => article
            .source_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| (url.to_string(), String::new())),
        DedupePass::TitleSummary => Some((
            article.title.to_lowercase(),
            article
                .summary
                .as_deref()
                .unwrap_or("")
                .to_lowercase(),
        )),
    }
}
