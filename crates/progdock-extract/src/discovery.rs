//! Batch discovery in the prediction directory.

use std::path::Path;

use tracing::{debug, info};

use crate::batch::BatchFile;
use crate::error::{ExtractError, Result};

/// Substring a prediction file name must contain to count as a batch.
///
/// The prediction files carry the name of the molecule batch they were
/// scored from, hence "smile" even though they hold scores.
pub const BATCH_NAME_MARKER: &str = "smile";

/// List every entry of `morgan_dir` whose file name contains
/// [`BATCH_NAME_MARKER`]. Results are sorted by file name.
pub fn discover_batches(morgan_dir: &Path) -> Result<Vec<BatchFile>> {
    let to_err = |source: std::io::Error| ExtractError::Discovery {
        path: morgan_dir.to_path_buf(),
        source,
    };

    let mut batches = Vec::new();
    for entry in std::fs::read_dir(morgan_dir).map_err(to_err)? {
        let entry = entry.map_err(to_err)?;
        let name = entry.file_name();
        if name.to_string_lossy().contains(BATCH_NAME_MARKER) {
            batches.push(BatchFile::new(entry.path()));
        } else {
            debug!("Ignoring {:?}", name);
        }
    }

    batches.sort_by_key(|b| b.name());
    for batch in &batches {
        info!(" - {}", batch.name());
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_only_marked_files_are_batches() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["smile_all_2.txt", "smile_all_1.txt", "morgan_1.csv", "notes.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let names: Vec<String> = discover_batches(dir.path())
            .unwrap()
            .iter()
            .map(BatchFile::name)
            .collect();
        assert_eq!(names, vec!["smile_all_1.txt", "smile_all_2.txt"]);
    }

    #[test]
    fn test_empty_directory_yields_no_batches() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_batches(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_batches(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ExtractError::Discovery { .. }));
        assert!(!err.is_dispatch_failure());
    }
}
