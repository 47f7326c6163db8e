//! Bounded concurrent validation of many files.
//!
//! Each file is checked in its own task; a semaphore permit is acquired
//! before the task is spawned, so at most `concurrency` checks are in
//! flight. Tasks share no state: each returns its [`FileOutcome`] and the
//! tallies are folded once all tasks have joined.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::validator::{FileCheck, FileOutcome};

/// Outcomes of a batch run and their tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Number of files with an outcome.
    pub total: usize,
    /// Number of outcomes that are not a success.
    pub failed: usize,
    /// One outcome per checked file, in completion order.
    pub outcomes: Vec<FileOutcome>,
    /// Set when the run was cancelled before every file was checked.
    pub interrupted: bool,
}

impl BatchResult {
    /// Folds collected outcomes into a result.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<FileOutcome>, interrupted: bool) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        Self {
            total: outcomes.len(),
            failed,
            outcomes,
            interrupted,
        }
    }

    /// Number of passing files.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.total - self.failed
    }
}

/// Runs a [`FileCheck`] over many files with bounded concurrency.
pub struct BatchScheduler<C> {
    check: Arc<C>,
    concurrency: usize,
}

impl<C: FileCheck + 'static> BatchScheduler<C> {
    /// Creates a scheduler running at most `concurrency` checks at once.
    ///
    /// A concurrency of zero is raised to one.
    #[must_use]
    pub fn new(check: C, concurrency: usize) -> Self {
        Self {
            check: Arc::new(check),
            concurrency: concurrency.max(1),
        }
    }

    /// Maximum number of checks in flight.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Checks every file and returns once all outcomes are in.
    ///
    /// Every file yields exactly one outcome unless `cancel` fires: then no
    /// new checks start, in-flight checks are aborted, and the result holds
    /// only the outcomes completed so far with `interrupted` set.
    pub async fn run(&self, files: Vec<PathBuf>, cancel: &CancellationToken) -> BatchResult {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut pending: HashMap<tokio::task::Id, PathBuf> = HashMap::with_capacity(files.len());
        let mut outcomes = Vec::with_capacity(files.len());
        let mut interrupted = false;

        tracing::info!(
            files = files.len(),
            concurrency = self.concurrency,
            "starting batch"
        );

        for path in files {
            let permit = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    interrupted = true;
                    break;
                }
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let check = Arc::clone(&self.check);
            let task_path = path.clone();
            let handle = tasks.spawn(async move {
                let _permit = permit;
                check.check(&task_path).await
            });
            pending.insert(handle.id(), path);

            // Collect finished work so outcomes do not pile up in the set
            while let Some(joined) = tasks.try_join_next_with_id() {
                outcomes.push(collect(joined, &mut pending));
            }
        }

        while !interrupted {
            tokio::select! {
                biased;
                () = cancel.cancelled() => interrupted = true,
                joined = tasks.join_next_with_id() => match joined {
                    Some(joined) => outcomes.push(collect(joined, &mut pending)),
                    None => break,
                },
            }
        }

        if interrupted {
            tracing::warn!(
                completed = outcomes.len(),
                abandoned = pending.len(),
                "batch interrupted"
            );
            tasks.shutdown().await;
        }

        let result = BatchResult::from_outcomes(outcomes, interrupted);
        tracing::info!(
            total = result.total,
            failed = result.failed,
            "batch complete"
        );
        result
    }
}

/// Turns a joined task into an outcome, attributing panics to the task's
/// file.
fn collect(
    joined: Result<(tokio::task::Id, FileOutcome), tokio::task::JoinError>,
    pending: &mut HashMap<tokio::task::Id, PathBuf>,
) -> FileOutcome {
    match joined {
        Ok((id, outcome)) => {
            pending.remove(&id);
            outcome
        }
        Err(err) => {
            let path = pending.remove(&err.id()).unwrap_or_default();
            tracing::error!(file = %path.display(), error = %err, "validation task failed");
            FileOutcome::parse_error(path, format!("validation task failed: {err}"))
        }
    }
}
