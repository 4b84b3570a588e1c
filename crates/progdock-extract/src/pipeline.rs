//! Final extraction pipeline.
//!
//! Orchestrates one extraction run:
//!   1. Discover batch prediction files
//!   2. Merge each batch with its molecule file on a bounded worker pool
//!   3. Concatenate and sort the merged rows by score
//!   4. Truncate to the requested number of molecules
//!   5. Write `smiles.csv` and `id_score.csv`
//!   6. Write the `final_phase.info` status marker
//!
//! A failed dispatch is not a process error: the run records `Failed` in the
//! marker, writes no artifacts and returns [`ExtractionOutcome::Failed`] so
//! the orchestration can fall back to the single-process extractor.

use std::path::PathBuf;

use progdock_common::ExtractionSettings;
use tracing::{error, info, instrument};

use crate::batch::{BatchFile, MergeContext};
use crate::discovery::discover_batches;
use crate::dispatch::{dispatch, FailurePolicy};
use crate::error::{ExtractError, Result};
use crate::output::{log_head, write_id_scores, write_smiles};
use crate::ranking::{GlobalRanking, MolsToDock};
use crate::status::{clear_marker, write_marker, RunStatus};

// ── Job config ────────────────────────────────────────────────────────────────

/// Where a run writes its artifacts.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub smiles: PathBuf,
    pub id_score: PathBuf,
    pub status: PathBuf,
}

impl OutputPaths {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            dir: settings.output_dir.clone(),
            smiles: settings.smiles_path(),
            id_score: settings.id_score_path(),
            status: settings.status_path(),
        }
    }
}

/// Parameters for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Directory of prediction files (`id,score`)
    pub morgan_dir: PathBuf,
    /// Directory of molecule files (`smile id`)
    pub smile_dir: PathBuf,
    /// Upper bound on merge workers
    pub processors: usize,
    pub mols_to_dock: MolsToDock,
    pub failure_policy: FailurePolicy,
    pub outputs: OutputPaths,
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub batches_found: usize,
    pub batches_merged: usize,
    pub batches_skipped: Vec<String>,
    pub rows_ranked: usize,
    pub rows_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug)]
pub enum ExtractionOutcome {
    Finished(ExtractionReport),
    /// The worker pool failed; the marker says `Failed`.
    Failed(ExtractError),
}

impl ExtractionOutcome {
    pub fn status(&self) -> RunStatus {
        match self {
            ExtractionOutcome::Finished(_) => RunStatus::Finished,
            ExtractionOutcome::Failed(_) => RunStatus::Failed,
        }
    }
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Run the extraction for one job.
///
/// Discovery and output errors are returned as `Err`; dispatch errors end
/// the run with a `Failed` marker and `Ok(ExtractionOutcome::Failed)`.
///
/// A marker from an earlier run never survives this call: it is removed up
/// front, and any error after the output directory exists records `Failed`
/// before being returned.
#[instrument(skip_all, fields(morgan_dir = %job.morgan_dir.display()))]
pub fn run_extraction(job: &ExtractionJob) -> Result<ExtractionOutcome> {
    let t0 = std::time::Instant::now();

    info!("Morgan Dir: {}", job.morgan_dir.display());
    info!("Smile Dir: {}", job.smile_dir.display());
    clear_marker(&job.outputs.status)?;

    // ── 1. Discover batches ───────────────────────────────────────────────────
    let batches = discover_batches(&job.morgan_dir)?;

    std::fs::create_dir_all(&job.outputs.dir)
        .map_err(|e| ExtractError::output(&job.outputs.dir, e))?;

    let result = extract_batches(job, &batches, t0);
    if let Err(e) = &result {
        error!("Final extraction aborted: {}", e);
        if let Err(marker_err) = write_marker(&job.outputs.status, RunStatus::Failed) {
            error!("Could not record the failed run: {}", marker_err);
        }
    }
    result
}

fn extract_batches(
    job: &ExtractionJob,
    batches: &[BatchFile],
    t0: std::time::Instant,
) -> Result<ExtractionOutcome> {
    // ── 2. Merge on the worker pool ───────────────────────────────────────────
    info!("Finding smiles...");
    if let Ok(cpus) = std::thread::available_parallelism() {
        info!("Number of CPUs: {}", cpus);
    }

    let ctx = MergeContext::new(&job.smile_dir);
    let dispatched = match dispatch(batches, job.processors, job.failure_policy, |b| ctx.merge(b)) {
        Ok(outcome) => outcome,
        Err(e) if e.is_dispatch_failure() => {
            error!("While performing the final extraction, we encountered the following error: {}", e);
            error!(
                "This is likely because the batch data is too large to merge in parallel \
                 with the available memory."
            );
            error!("Retry with the single-process fallback extractor, which is slower but can handle more data.");
            write_marker(&job.outputs.status, RunStatus::Failed)?;
            return Ok(ExtractionOutcome::Failed(e));
        }
        Err(e) => return Err(e),
    };

    // ── 3. Rank ───────────────────────────────────────────────────────────────
    let batches_merged = dispatched.batches.len();
    let mut ranking = GlobalRanking::from_batches(dispatched.batches);
    let rows_ranked = ranking.len();
    info!("Finished sorting {} rows. Top of the ranking:", rows_ranked);
    log_head(&ranking, 5);

    // ── 4. Truncate ───────────────────────────────────────────────────────────
    ranking.truncate(job.mols_to_dock);

    // ── 5. Save artifacts ─────────────────────────────────────────────────────
    info!("Saving");
    write_smiles(&job.outputs.smiles, &ranking)?;
    write_id_scores(&job.outputs.id_score, &ranking)?;

    // ── 6. Mark completion ────────────────────────────────────────────────────
    write_marker(&job.outputs.status, RunStatus::Finished)?;

    let report = ExtractionReport {
        batches_found: batches.len(),
        batches_merged,
        batches_skipped: dispatched.skipped,
        rows_ranked,
        rows_written: ranking.len(),
        duration_ms: t0.elapsed().as_millis() as u64,
    };

    info!(
        batches_found  = report.batches_found,
        batches_merged = report.batches_merged,
        skipped        = report.batches_skipped.len(),
        rows_ranked    = report.rows_ranked,
        rows_written   = report.rows_written,
        duration_ms    = report.duration_ms,
        "Final extraction complete"
    );

    Ok(ExtractionOutcome::Finished(report))
}
