//! Purge orchestration
//!
//! Applies a [`resolve`](super::resolve) decision to the store: one bulk
//! read up front, then one bulk delete per pass, in pass order. Passes
//! operate on disjoint shrinking sets, so a failed pass leaves earlier
//! passes' deletions in place.

use serde::Serialize;

use super::{resolve, DedupePass};
use crate::db::ArticleRepository;
use crate::error::Result;

/// Applied (or projected, under dry-run) result of one pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// Which pass this row describes
    pub pass: DedupePass,
    /// Number of groups that contained more than one record
    pub duplicate_groups: usize,
    /// Ids marked for removal by the resolver
    pub marked: usize,
    /// Rows actually removed from the store (0 under dry-run)
    pub deleted: usize,
}

/// Summary of a full purge run
#[derive(Debug, Clone, Serialize)]
pub struct PurgeReport {
    /// Articles present before the run
    pub initial_count: usize,
    /// Articles remaining after the run (projected under dry-run)
    pub final_count: usize,
    /// Rows removed (projected under dry-run)
    pub total_removed: usize,
    /// Whether deletes were skipped
    pub dry_run: bool,
    /// Per-pass breakdown, in execution order
    pub passes: Vec<PassReport>,
}

/// Run the duplicate purge against the store.
///
/// Reads the full article set, resolves it once in memory, then issues one
/// bulk delete per pass. A delete that affects fewer rows than marked is
/// reported as a shortfall, not retried. With `dry_run` set, nothing is
/// deleted and the report carries projected counts.
pub fn purge<R: ArticleRepository>(repo: &R, dry_run: bool) -> Result<PurgeReport> {
    let articles = repo.list_all()?;
    let initial_count = articles.len();
    tracing::info!("Resolving duplicates across {initial_count} articles");

    let resolution = resolve(&articles);

    let mut passes = Vec::with_capacity(resolution.passes.len());
    let mut total_removed = 0usize;

    for outcome in &resolution.passes {
        let marked = outcome.removed.len();
        let deleted = if dry_run {
            0
        } else {
            repo.delete_many(&outcome.removed)?
        };

        if !dry_run && deleted < marked {
            tracing::warn!(
                "{} pass: {} of {} marked rows were not removed",
                outcome.pass.label(),
                marked - deleted,
                marked
            );
        }
        tracing::info!(
            "{} pass: {} duplicate groups, {} marked, {} deleted",
            outcome.pass.label(),
            outcome.duplicate_groups,
            marked,
            deleted
        );

        total_removed += if dry_run { marked } else { deleted };
        passes.push(PassReport {
            pass: outcome.pass,
            duplicate_groups: outcome.duplicate_groups,
            marked,
            deleted,
        });
    }

    Ok(PurgeReport {
        initial_count,
        final_count: initial_count - total_removed,
        total_removed,
        dry_run,
        passes,
    })
}

impl PurgeReport {
    /// Per-pass report for the given pass kind
    #[must_use]
    pub fn pass(&self, pass: DedupePass) -> Option<&PassReport> {
        self.passes.iter().find(|report| report.pass == pass)
    }
}
