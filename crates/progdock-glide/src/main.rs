//! input-glide — write the docking control files for one round.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use progdock_common::{legacy_args, logging};
use progdock_glide::{generate_inputs, GlideJob, Round};

const LEGACY_FLAGS: &[&str] = &[
    "protein",
    "file_path",
    "gf",
    "grid_file",
    "n_it",
    "iteration_no",
    "g_in",
    "glide_input",
];

#[derive(Debug, Parser)]
#[command(name = "input-glide", version, about)]
struct Args {
    /// Protein (project) name
    #[arg(long)]
    protein: String,

    /// Root directory holding the protein projects
    #[arg(long = "file_path")]
    file_path: PathBuf,

    /// Grid file written on the GRIDFILE line
    #[arg(long = "grid_file", visible_alias = "gf")]
    grid_file: String,

    /// Iteration number, or -1 for the after-iteration round
    #[arg(long = "iteration_no", visible_alias = "n_it", allow_negative_numbers = true)]
    iteration_no: i64,

    /// Template control file
    #[arg(long = "glide_input", visible_alias = "g_in")]
    glide_input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    logging::init("progdock_glide=debug,input_glide=debug,info");

    let args = Args::parse_from(legacy_args::normalise(std::env::args(), LEGACY_FLAGS));
    let job = GlideJob {
        protein: args.protein,
        file_path: args.file_path,
        grid_file: args.grid_file,
        round: Round::from_iteration_no(args.iteration_no),
        template: args.glide_input,
    };

    generate_inputs(&job).context("Could not generate docking inputs")?;
    Ok(())
}
