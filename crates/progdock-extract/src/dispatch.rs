//! Bounded parallel fan-out of the per-batch merge worker.
//!
//! Each run builds its own rayon pool sized `min(batches, processors)`; the
//! pool is dropped when [`dispatch`] returns, on success or failure.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::batch::{BatchFile, MergedBatch};
use crate::error::{ExtractError, Result};

/// What to do when a batch fails to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any failed batch fails the whole dispatch.
    #[default]
    AbortAll,
    /// Log and skip failed batches; fail only if every batch failed.
    SkipFailed,
}

/// Merged batches in submission order, plus any skipped batch names.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub batches: Vec<MergedBatch>,
    pub skipped: Vec<String>,
}

/// Number of workers for a dispatch.
pub fn pool_size(batches: usize, processors: usize) -> usize {
    batches.min(processors)
}

/// Run `worker` over every batch on a dedicated pool.
pub fn dispatch<F>(
    batches: &[BatchFile],
    processors: usize,
    policy: FailurePolicy,
    worker: F,
) -> Result<DispatchOutcome>
where
    F: Fn(&BatchFile) -> Result<MergedBatch> + Sync,
{
    let workers = pool_size(batches.len(), processors);
    if workers == 0 {
        return Err(ExtractError::EmptyPool {
            batches: batches.len(),
            processors,
        });
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("merge-worker-{i}"))
        .build()
        .map_err(|e| ExtractError::Pool(e.to_string()))?;

    info!("Dispatching {} batches across {} workers", batches.len(), workers);

    let run_one = |batch: &BatchFile| {
        worker(batch).map_err(|source| ExtractError::Worker {
            batch: batch.name(),
            source: Box::new(source),
        })
    };

    match policy {
        FailurePolicy::AbortAll => {
            let merged = pool.install(|| {
                batches
                    .par_iter()
                    .map(run_one)
                    .collect::<Result<Vec<_>>>()
            })?;
            Ok(DispatchOutcome {
                batches: merged,
                skipped: Vec::new(),
            })
        }
        FailurePolicy::SkipFailed => {
            let results: Vec<Result<MergedBatch>> =
                pool.install(|| batches.par_iter().map(run_one).collect());

            let mut outcome = DispatchOutcome::default();
            let mut first_error = None;
            for (batch, result) in batches.iter().zip(results) {
                match result {
                    Ok(merged) => outcome.batches.push(merged),
                    Err(e) => {
                        warn!("Skipping batch {}: {}", batch.name(), e);
                        outcome.skipped.push(batch.name());
                        first_error.get_or_insert(e);
                    }
                }
            }

            match first_error {
                Some(e) if outcome.batches.is_empty() => Err(e),
                _ => Ok(outcome),
            }
        }
    }
}
