//! Writers for the two ranking artifacts.
//!
//! `smiles.csv` and `id_score.csv` are correlated only by row position:
//! row `i` of one describes the same molecule as row `i` of the other.
//! Both carry the dense ranking index as their first column and the same
//! header layout as the data-frame CSV writer used elsewhere in the
//! pipeline (an empty index label followed by the column names).

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::ranking::GlobalRanking;

/// Render a score the way downstream readers expect: shortest round-trip
/// form that still carries a decimal point, empty for NaN. Exponents carry a
/// sign and at least two digits (`1e-07`, `1e+16`).
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return String::new();
    }

    let repr = format!("{score:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

fn writer_for(path: &Path, delimiter: u8) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| ExtractError::output(path, e))
}

/// Write `index smile id` rows, space separated.
pub fn write_smiles(path: &Path, ranking: &GlobalRanking) -> Result<()> {
    let mut writer = writer_for(path, b' ')?;
    let to_err = |e: csv::Error| ExtractError::output(path, e);

    writer.write_record(["", "smile", "id"]).map_err(to_err)?;
    for (i, row) in ranking.rows().iter().enumerate() {
        writer
            .write_record([i.to_string().as_str(), row.smile.as_str(), row.id.as_str()])
            .map_err(to_err)?;
    }
    writer.flush().map_err(|e| ExtractError::output(path, e))?;

    info!("Saved {} rows to {}", ranking.len(), path.display());
    Ok(())
}

/// Write `index,id,score` rows, comma separated.
pub fn write_id_scores(path: &Path, ranking: &GlobalRanking) -> Result<()> {
    let mut writer = writer_for(path, b',')?;
    let to_err = |e: csv::Error| ExtractError::output(path, e);

    writer.write_record(["", "id", "score"]).map_err(to_err)?;
    for (i, row) in ranking.rows().iter().enumerate() {
        writer
            .write_record([i.to_string(), row.id.clone(), format_score(row.score)])
            .map_err(to_err)?;
    }
    writer.flush().map_err(|e| ExtractError::output(path, e))?;

    info!("Saved {} rows to {}", ranking.len(), path.display());
    Ok(())
}

/// Log the first rows of the ranking.
pub fn log_head(ranking: &GlobalRanking, n: usize) {
    for (i, row) in ranking.rows().iter().take(n).enumerate() {
        debug!("{:>5}  {:<16} {:<12} {}", i, row.id, format_score(row.score), row.smile);
    }
}
