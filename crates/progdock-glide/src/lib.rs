//! progdock-glide — Docking control files for one progressive docking round.
//!
//! For every ligand batch in `<round>/sdf/` a control file is written to
//! `<round>/docked/<name>_docked.in`, copied from a template with the
//! `GRIDFILE` and `LIGANDFILE` lines pointing at this round's inputs.

pub mod error;
pub mod layout;
pub mod template;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use error::{GlideError, Result};
pub use layout::{Round, RoundLayout};
pub use template::ControlTemplate;

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GlideJob {
    pub protein: String,
    pub file_path: PathBuf,
    pub grid_file: String,
    pub round: Round,
    pub template: PathBuf,
}

/// Ligand files in `dir`, hidden entries and subdirectories excluded,
/// sorted by name.
fn ligand_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let to_err = |source: std::io::Error| GlideError::LigandDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_err)? {
        let entry = entry.map_err(to_err)?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type().map_err(to_err)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Write one control file per ligand batch. Returns the written paths.
pub fn generate_inputs(job: &GlideJob) -> Result<Vec<PathBuf>> {
    let layout = RoundLayout::new(&job.file_path, &job.protein, job.round);
    let template = ControlTemplate::load(&job.template)?;
    info!("Generating docking inputs for {} ({})", job.protein, job.round);

    let ligands = ligand_files(&layout.sdf_dir())?;

    // Only the leaf is created; a missing round directory is an error.
    let docked_dir = layout.docked_dir();
    match std::fs::create_dir(&docked_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(source) => {
            return Err(GlideError::CreateDir {
                path: docked_dir,
                source,
            })
        }
    }

    let mut written = Vec::new();
    for ligand in ligands {
        let file_name = ligand
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out = docked_dir.join(format!("{}.in", job.round.docked_name(&file_name)));

        let content = template.render(&job.grid_file, &ligand.to_string_lossy());
        std::fs::write(&out, content).map_err(|source| GlideError::Write {
            path: out.clone(),
            source,
        })?;

        debug!("{} -> {}", file_name, out.display());
        written.push(out);
    }

    info!("Wrote {} control files to {}", written.len(), docked_dir.display());
    Ok(written)
}
