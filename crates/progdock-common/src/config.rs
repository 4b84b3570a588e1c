//! Configuration loading for the progressive docking tools.
//! Reads progdock.toml from the current directory, the path in the
//! PROGDOCK_CONFIG env var, or an explicit path given on the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "progdock.toml";

/// Env var that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "PROGDOCK_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionSettings,
}

/// Settings for the final extraction phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Directory receiving both artifacts and the status marker
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_smiles_file")]
    pub smiles_file: String,
    #[serde(default = "default_id_score_file")]
    pub id_score_file: String,
    #[serde(default = "default_status_file")]
    pub status_file: String,
    /// Count or "All"; the command line wins when both are given
    #[serde(default)]
    pub mols_to_dock: Option<String>,
    #[serde(default)]
    pub skip_failed_batches: bool,
}

fn default_output_dir()    -> PathBuf { PathBuf::from(".") }
fn default_smiles_file()   -> String  { "smiles.csv".to_string() }
fn default_id_score_file() -> String  { "id_score.csv".to_string() }
fn default_status_file()   -> String  { "final_phase.info".to_string() }

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            smiles_file: default_smiles_file(),
            id_score_file: default_id_score_file(),
            status_file: default_status_file(),
            mols_to_dock: None,
            skip_failed_batches: false,
        }
    }
}

impl ExtractionSettings {
    pub fn smiles_path(&self) -> PathBuf {
        self.output_dir.join(&self.smiles_file)
    }

    pub fn id_score_path(&self) -> PathBuf {
        self.output_dir.join(&self.id_score_file)
    }

    pub fn status_path(&self) -> PathBuf {
        self.output_dir.join(&self.status_file)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path or a path from PROGDOCK_CONFIG must exist. The
    /// default progdock.toml is optional; built-in defaults apply without it.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_pipeline_file_names() {
        let settings = ExtractionSettings::default();
        assert_eq!(settings.smiles_path(), PathBuf::from("./smiles.csv"));
        assert_eq!(settings.id_score_path(), PathBuf::from("./id_score.csv"));
        assert_eq!(settings.status_path(), PathBuf::from("./final_phase.info"));
        assert!(settings.mols_to_dock.is_none());
        assert!(!settings.skip_failed_batches);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extraction]\noutput_dir = \"/tmp/phase5\"\nmols_to_dock = \"All\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.extraction.output_dir, PathBuf::from("/tmp/phase5"));
        assert_eq!(config.extraction.mols_to_dock.as_deref(), Some("All"));
        assert_eq!(config.extraction.smiles_file, "smiles.csv");
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.extraction.status_file, "final_phase.info");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extraction\noutput_dir = ").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
