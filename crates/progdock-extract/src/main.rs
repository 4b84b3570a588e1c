//! final-extraction — merge, rank and truncate the predicted scores of every
//! batch, then write `smiles.csv`, `id_score.csv` and `final_phase.info`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use progdock_common::{legacy_args, logging, Config};
use progdock_extract::{
    run_extraction, ExtractionJob, ExtractionOutcome, FailurePolicy, MolsToDock, OutputPaths,
};
use tracing::{info, warn};

/// Flag names accepted with a single leading dash.
const LEGACY_FLAGS: &[&str] = &[
    "smile_dir",
    "morgan_dir",
    "processors",
    "mols_to_dock",
    "output_dir",
    "skip_failed_batches",
    "config",
];

#[derive(Debug, Parser)]
#[command(name = "final-extraction", version, about)]
struct Args {
    /// Directory of molecule files (`smile id`, space separated)
    #[arg(long = "smile_dir")]
    smile_dir: PathBuf,

    /// Directory of prediction files; only names containing "smile" are read
    #[arg(long = "morgan_dir")]
    morgan_dir: PathBuf,

    /// Upper bound on parallel merge workers
    #[arg(long)]
    processors: usize,

    /// Number of top molecules to keep, or "All"
    #[arg(long = "mols_to_dock")]
    mols_to_dock: Option<String>,

    /// Directory for the output files and status marker
    #[arg(long = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Skip batches that fail to merge instead of failing the run
    #[arg(long = "skip_failed_batches")]
    skip_failed_batches: bool,

    /// TOML config file (defaults to progdock.toml or $PROGDOCK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn build_job(args: Args, config: Config) -> anyhow::Result<ExtractionJob> {
    let mut settings = config.extraction;
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }

    let mols_to_dock = MolsToDock::from_option(
        args.mols_to_dock
            .as_deref()
            .or(settings.mols_to_dock.as_deref()),
    )?;

    let failure_policy = if args.skip_failed_batches || settings.skip_failed_batches {
        FailurePolicy::SkipFailed
    } else {
        FailurePolicy::AbortAll
    };

    Ok(ExtractionJob {
        morgan_dir: args.morgan_dir,
        smile_dir: args.smile_dir,
        processors: args.processors,
        mols_to_dock,
        failure_policy,
        outputs: OutputPaths::from_settings(&settings),
    })
}

fn main() -> anyhow::Result<()> {
    logging::init("progdock_extract=debug,final_extraction=debug,info");

    let args = Args::parse_from(legacy_args::normalise(std::env::args(), LEGACY_FLAGS));
    let config = Config::load(args.config.as_deref()).context("Could not load configuration")?;
    let job = build_job(args, config)?;

    match run_extraction(&job).context("Final extraction aborted")? {
        ExtractionOutcome::Finished(report) => {
            info!(
                "Finished: {} of {} rows written from {} batches",
                report.rows_written, report.rows_ranked, report.batches_merged
            );
        }
        ExtractionOutcome::Failed(e) => {
            warn!("Final extraction failed ({}); status recorded in {}", e, job.outputs.status.display());
        }
    }

    Ok(())
}
