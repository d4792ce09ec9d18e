//! Link dispatching.
//!
//! [`LinkQueue`] owns a single worker task that creates links one at a time,
//! in the order they were queued. A failed link is logged and recorded, then
//! the worker moves on to the next key; nothing is retried.

use crate::error::{LinkerError, LinkerResult};
use release_linker_tracker::{IssueKey, IssueTracker, LinkRequest};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Link type created when none is configured.
pub const DEFAULT_LINK_TYPE: &str = "Release Decision";

/// How queued keys are linked.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Ticket placed on the outward side of every link.
    pub release_ticket: IssueKey,
    pub link_type: String,
    /// Log candidates instead of creating links.
    pub dry_run: bool,
}

impl DispatchOptions {
    pub fn new(release_ticket: IssueKey) -> Self {
        Self {
            release_ticket,
            link_type: DEFAULT_LINK_TYPE.to_string(),
            dry_run: false,
        }
    }
}

/// What happened to one queued key.
#[derive(Debug)]
pub enum LinkOutcome {
    Linked,
    /// Dry run: reported, not linked.
    Skipped,
    Failed(LinkerError),
}

#[derive(Debug)]
pub struct LinkResult {
    pub key: IssueKey,
    pub outcome: LinkOutcome,
}

/// Outcomes of every attempt, in queue order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub results: Vec<LinkResult>,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn linked(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Linked))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&LinkOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Single-worker queue of pending links.
pub struct LinkQueue {
    sender: mpsc::UnboundedSender<IssueKey>,
    worker: JoinHandle<DispatchReport>,
    finished: watch::Receiver<bool>,
}

impl LinkQueue {
    /// Start the worker. Must be called inside a tokio runtime.
    pub fn spawn(tracker: Arc<dyn IssueTracker>, options: DispatchOptions) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (finished_tx, finished) = watch::channel(false);
        let worker = tokio::spawn(run_worker(tracker, options, receiver, finished_tx));

        Self {
            sender,
            worker,
            finished,
        }
    }

    /// Queue one key for linking.
    pub fn enqueue(&self, key: IssueKey) -> LinkerResult<()> {
        self.sender.send(key).map_err(|e| {
            LinkerError::Queue(format!("worker stopped before {} was queued", e.0))
        })
    }

    /// Completion signal; turns `true` once every queued key was attempted
    /// after [`LinkQueue::drain`] closed the queue.
    pub fn finished(&self) -> watch::Receiver<bool> {
        self.finished.clone()
    }

    /// Close the queue and wait for the worker to attempt every queued key.
    pub async fn drain(self) -> LinkerResult<DispatchReport> {
        let Self { sender, worker, .. } = self;
        drop(sender);
        worker
            .await
            .map_err(|e| LinkerError::Queue(format!("link worker failed: {}", e)))
    }
}

async fn run_worker(
    tracker: Arc<dyn IssueTracker>,
    options: DispatchOptions,
    mut receiver: mpsc::UnboundedReceiver<IssueKey>,
    finished: watch::Sender<bool>,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    while let Some(key) = receiver.recv().await {
        let outcome = link_one(tracker.as_ref(), &options, &key).await;
        report.results.push(LinkResult { key, outcome });
    }

    tracing::info!("Issue linking finished.");
    finished.send_replace(true);
    report
}

async fn link_one(
    tracker: &dyn IssueTracker,
    options: &DispatchOptions,
    key: &IssueKey,
) -> LinkOutcome {
    if options.dry_run {
        tracing::info!("DRY: not linked {}", key);
        return LinkOutcome::Skipped;
    }

    let request = LinkRequest::new(
        options.link_type.clone(),
        options.release_ticket.clone(),
        key.clone(),
    );

    match tracker.create_link(&request).await {
        Ok(()) => {
            tracing::info!("created {}", key);
            LinkOutcome::Linked
        }
        Err(source) => {
            tracing::error!(
                issue = %key,
                status = ?source.status(),
                error_name = source.name(),
                message = %source,
                "Error creating {}",
                key
            );
            LinkOutcome::Failed(LinkerError::LinkCreation {
                key: key.clone(),
                source,
            })
        }
    }
}

/// Queue every pending key on a fresh [`LinkQueue`] and wait for completion.
pub async fn dispatch(
    tracker: Arc<dyn IssueTracker>,
    pending: Vec<IssueKey>,
    options: DispatchOptions,
) -> LinkerResult<DispatchReport> {
    let queue = LinkQueue::spawn(tracker, options);
    for key in pending {
        queue.enqueue(key)?;
    }
    queue.drain().await
}
