//! End-to-end linking run.

use crate::config::LinkerSettings;
use crate::dispatch::{dispatch, DispatchReport};
use crate::error::{LinkerError, LinkerResult};
use crate::extract::extract_issue_keys;
use crate::git_history::CommitHistory;
use crate::reconcile::reconcile;
use crate::tags::{resolve_boundary, TagBoundary};
use release_linker_tracker::{IssueKey, IssueTracker};
use std::sync::Arc;

/// What one run found and did.
#[derive(Debug)]
pub struct RunSummary {
    pub boundary: TagBoundary,
    /// Distinct keys referenced since the boundary.
    pub history_keys: Vec<IssueKey>,
    pub already_linked: Vec<IssueKey>,
    pub pending: Vec<IssueKey>,
    pub report: DispatchReport,
}

/// Issue keys referenced in commit subjects made since the tag before `tag`.
pub fn collect_history_keys(
    history: &dyn CommitHistory,
    tag: &str,
) -> LinkerResult<(TagBoundary, Vec<IssueKey>)> {
    tracing::info!("Getting local commits from tag {}", tag);

    let tags = history.list_tags()?;
    let boundary = resolve_boundary(&tags, tag)?;
    let subjects = history.subjects_since(&boundary)?;
    let keys = extract_issue_keys(&subjects);

    tracing::info!("All release issues: {}", keys.len());
    Ok((boundary, keys))
}

/// Keys linked inward to `ticket`. A failed fetch stops the run.
pub async fn fetch_linked_issues(
    tracker: &dyn IssueTracker,
    ticket: &str,
) -> LinkerResult<Vec<IssueKey>> {
    let ticket = LinkerSettings::parse_release_ticket(ticket).map_err(|e| {
        tracing::error!("invalid release ticket {:?}", ticket);
        e
    })?;

    let issue = tracker
        .fetch_issue(&ticket)
        .await
        .map_err(LinkerError::RemoteFetch)?;

    Ok(issue.inward_keys())
}

/// Run the whole pipeline: history, reconciliation, then link dispatch.
pub async fn run(
    history: &dyn CommitHistory,
    tracker: Arc<dyn IssueTracker>,
    settings: &LinkerSettings,
) -> LinkerResult<RunSummary> {
    let (boundary, history_keys) = collect_history_keys(history, &settings.tag)?;

    let already_linked =
        fetch_linked_issues(tracker.as_ref(), settings.release_ticket.as_str()).await?;
    let pending = reconcile(&history_keys, &already_linked);

    tracing::info!("Issues not yet linked: {}", pending.len());

    let report = dispatch(tracker, pending.clone(), settings.dispatch_options()).await?;

    tracing::info!(
        "Linked {}, failed {}, skipped {} of {} pending issues",
        report.linked(),
        report.failed(),
        report.skipped(),
        report.attempted()
    );

    Ok(RunSummary {
        boundary,
        history_keys,
        already_linked,
        pending,
        report,
    })
}
