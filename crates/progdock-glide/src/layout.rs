//! Project directory layout for one docking round.

use std::fmt;
use std::path::{Path, PathBuf};

/// Which docking round the control files are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// A numbered iteration: `<project>/iteration_<n>`.
    Iteration(i64),
    /// Final docking after the last iteration: `<project>/after_iteration/to_dock`.
    AfterIteration,
}

impl Round {
    /// `-1` selects the after-iteration round.
    pub fn from_iteration_no(n: i64) -> Self {
        if n == -1 {
            Round::AfterIteration
        } else {
            Round::Iteration(n)
        }
    }

    /// Control-file stem for a ligand file name.
    ///
    /// Iteration ligands are named `<batch>_<suffix>` and keep the part before
    /// the first underscore; after-iteration ligands keep the part before the
    /// first dot.
    pub fn docked_name(&self, ligand_file_name: &str) -> String {
        let sep = match self {
            Round::Iteration(_) => '_',
            Round::AfterIteration => '.',
        };
        let stem = ligand_file_name.split(sep).next().unwrap_or(ligand_file_name);
        format!("{stem}_docked")
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Iteration(n) => write!(f, "iteration {n}"),
            Round::AfterIteration => f.write_str("after iteration"),
        }
    }
}

/// Resolved directories for one protein and round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundLayout {
    pub work_dir: PathBuf,
}

impl RoundLayout {
    pub fn new(file_path: &Path, protein: &str, round: Round) -> Self {
        let project = file_path.join(protein);
        let work_dir = match round {
            Round::Iteration(n) => project.join(format!("iteration_{n}")),
            Round::AfterIteration => project.join("after_iteration").join("to_dock"),
        };
        Self { work_dir }
    }

    /// Ligand batches to dock.
    pub fn sdf_dir(&self) -> PathBuf {
        self.work_dir.join("sdf")
    }

    /// Where the generated control files go.
    pub fn docked_dir(&self) -> PathBuf {
        self.work_dir.join("docked")
    }
}
