use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlideError {
    #[error("Cannot read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list ligand directory {path}: {source}")]
    LigandDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GlideError>;
