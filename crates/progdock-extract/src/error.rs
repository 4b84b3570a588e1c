use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Cannot list prediction directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}{}: {reason}", line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },

    #[error("Worker pool would be empty ({batches} batches, {processors} processors)")]
    EmptyPool { batches: usize, processors: usize },

    #[error("Failed to build worker pool: {0}")]
    Pool(String),

    #[error("Batch {batch} failed: {source}")]
    Worker {
        batch: String,
        #[source]
        source: Box<ExtractError>,
    },

    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Errors raised while the worker pool is running. These end the run
    /// with a `Failed` status marker instead of a process error.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            ExtractError::Parse { .. }
                | ExtractError::EmptyPool { .. }
                | ExtractError::Pool(_)
                | ExtractError::Worker { .. }
        )
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        ExtractError::Output {
            path: path.into(),
            source: source.into(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ExtractError>;
