//! Completion marker polled by the orchestration scripts.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{ExtractError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Finished,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Finished => "Finished",
            RunStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overwrite the marker with the bare status token and sync it to disk.
pub fn write_marker(path: &Path, status: RunStatus) -> Result<()> {
    let to_err = |e: std::io::Error| ExtractError::output(path, e);

    let mut file = std::fs::File::create(path).map_err(to_err)?;
    file.write_all(status.as_str().as_bytes()).map_err(to_err)?;
    file.sync_all().map_err(to_err)?;

    info!("Status marker {} -> {}", path.display(), status);
    Ok(())
}

/// Remove a marker left by an earlier run. A missing marker is fine.
pub fn clear_marker(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!("Cleared previous status marker {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExtractError::output(path, e)),
    }
}
