//! History vs. already-linked reconciliation.

use release_linker_tracker::IssueKey;
use std::collections::HashSet;

/// Keys from `history` that are not in `linked`, in history order.
pub fn reconcile(history: &[IssueKey], linked: &[IssueKey]) -> Vec<IssueKey> {
    let linked: HashSet<&IssueKey> = linked.iter().collect();
    history
        .iter()
        .filter(|key| !linked.contains(key))
        .cloned()
        .collect()
}
