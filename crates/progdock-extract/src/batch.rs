//! Per-batch parsing and the identifier join.
//!
//! A batch is a pair of sibling files sharing a file name: the prediction
//! file (`id,score`, comma separated) lives in the prediction directory and
//! the molecule file (`smile id`, space separated) lives in the molecule
//! directory. Neither file has a header.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ExtractError, Result};

/// One discovered batch, named by its prediction file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFile {
    pub prediction_path: PathBuf,
}

impl BatchFile {
    pub fn new<P: AsRef<Path>>(prediction_path: P) -> Self {
        Self {
            prediction_path: prediction_path.as_ref().to_path_buf(),
        }
    }

    /// Base file name shared by the prediction and molecule files.
    pub fn name(&self) -> String {
        self.prediction_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sibling molecule file under `smile_dir`.
    pub fn molecule_path(&self, smile_dir: &Path) -> PathBuf {
        smile_dir.join(self.name())
    }
}

/// A predicted score for one molecule identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub id: String,
    pub score: f64,
}

/// A molecule string paired with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeRecord {
    pub smile: String,
    pub id: String,
}

/// A row of the inner join between predictions and molecules.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub id: String,
    pub score: f64,
    pub smile: String,
}

/// Join result for a single batch, rows in prediction-file order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedBatch {
    pub name: String,
    pub rows: Vec<MergedRecord>,
}

/// Immutable state every merge worker needs.
#[derive(Debug, Clone)]
pub struct MergeContext {
    pub smile_dir: PathBuf,
}

impl MergeContext {
    pub fn new<P: AsRef<Path>>(smile_dir: P) -> Self {
        Self {
            smile_dir: smile_dir.as_ref().to_path_buf(),
        }
    }

    /// Parse both files of a batch and join them on identifier.
    pub fn merge(&self, batch: &BatchFile) -> Result<MergedBatch> {
        let name = batch.name();
        info!("Merging {}...", name);

        let predictions = dedup_by_id(read_predictions(&batch.prediction_path)?, |r| &r.id);
        let molecules = dedup_by_id(read_molecules(&batch.molecule_path(&self.smile_dir))?, |r| &r.id);
        let rows = inner_join(predictions, molecules);

        debug!("Batch {} merged: {} rows", name, rows.len());
        Ok(MergedBatch { name, rows })
    }
}

fn reader_for(path: &Path, delimiter: u8) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ExtractError::Parse {
            path: path.to_path_buf(),
            line: None,
            reason: format!("cannot open file: {e}"),
        })
}

fn two_fields(path: &Path, record: &csv::StringRecord) -> Result<(String, String)> {
    let line = record.position().map(|p| p.line());
    if record.len() != 2 {
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            line,
            reason: format!("expected 2 fields, found {}", record.len()),
        });
    }
    Ok((record[0].to_string(), record[1].to_string()))
}

fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<(String, String, Option<u64>)>> {
    let mut reader = reader_for(path, delimiter)?;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ExtractError::Parse {
            path: path.to_path_buf(),
            line: e.position().map(|p| p.line()),
            reason: e.to_string(),
        })?;
        let (a, b) = two_fields(path, &record)?;
        rows.push((a, b, record.position().map(|p| p.line())));
    }
    Ok(rows)
}

/// Read a headerless `id,score` prediction file.
pub fn read_predictions(path: &Path) -> Result<Vec<ScoreRecord>> {
    read_rows(path, b',')?
        .into_iter()
        .map(|(id, raw_score, line)| {
            let score = raw_score.trim().parse::<f64>().map_err(|_| ExtractError::Parse {
                path: path.to_path_buf(),
                line,
                reason: format!("score {raw_score:?} is not a number"),
            })?;
            Ok(ScoreRecord { id, score })
        })
        .collect()
}

/// Read a headerless, space separated `smile id` molecule file.
pub fn read_molecules(path: &Path) -> Result<Vec<MoleculeRecord>> {
    Ok(read_rows(path, b' ')?
        .into_iter()
        .map(|(smile, id, _)| MoleculeRecord { smile, id })
        .collect())
}

/// Keep the first row seen for each identifier.
pub fn dedup_by_id<T, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &String,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(key(row).clone()))
        .collect()
}

/// Inner join on identifier. Output follows prediction order; identifiers
/// missing from either side are dropped. Both inputs must already be
/// deduplicated.
pub fn inner_join(predictions: Vec<ScoreRecord>, molecules: Vec<MoleculeRecord>) -> Vec<MergedRecord> {
    let mut smiles: HashMap<String, String> = molecules
        .into_iter()
        .map(|m| (m.id, m.smile))
        .collect();

    predictions
        .into_iter()
        .filter_map(|p| {
            smiles.remove(&p.id).map(|smile| MergedRecord {
                id: p.id,
                score: p.score,
                smile,
            })
        })
        .collect()
}
