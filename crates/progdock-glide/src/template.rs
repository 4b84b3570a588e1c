//! Control-file template with the grid and ligand lines substituted.

use std::path::Path;

use crate::error::{GlideError, Result};

pub const GRIDFILE_TAG: &str = "GRIDFILE";
pub const LIGANDFILE_TAG: &str = "LIGANDFILE";

/// A docking control file read once and rendered per ligand batch.
#[derive(Debug, Clone)]
pub struct ControlTemplate {
    text: String,
}

impl ControlTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(path: &Path) -> Result<Self> {
        std::fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| GlideError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Replace every line containing `GRIDFILE` with `GRIDFILE <grid_file>`,
    /// then every other line containing `LIGANDFILE` with
    /// `LIGANDFILE <ligand_file>`. All remaining lines are copied verbatim.
    pub fn render(&self, grid_file: &str, ligand_file: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + grid_file.len() + ligand_file.len());
        for line in self.text.split_inclusive('\n') {
            if line.contains(GRIDFILE_TAG) {
                out.push_str(&format!("{GRIDFILE_TAG} {grid_file}\n"));
            } else if line.contains(LIGANDFILE_TAG) {
                out.push_str(&format!("{LIGANDFILE_TAG} {ligand_file}\n"));
            } else {
                out.push_str(line);
            }
        }
        out
    }
}
