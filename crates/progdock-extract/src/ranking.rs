//! Global ranking across batches and top-K truncation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use progdock_common::ConfigError;
use tracing::info;

use crate::batch::{MergedBatch, MergedRecord};

/// How many molecules to keep for docking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MolsToDock {
    #[default]
    All,
    Top(usize),
}

impl MolsToDock {
    /// Parse an optional flag value; absent means `All`.
    pub fn from_option(value: Option<&str>) -> Result<Self, ConfigError> {
        value.map_or(Ok(MolsToDock::All), |v| v.parse())
    }
}

impl FromStr for MolsToDock {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "All" {
            return Ok(MolsToDock::All);
        }
        s.parse::<usize>()
            .map(MolsToDock::Top)
            .map_err(|e| ConfigError::InvalidValue {
                field: "mols_to_dock",
                value: s.to_string(),
                reason: format!("expected a count or \"All\": {e}"),
            })
    }
}

impl fmt::Display for MolsToDock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MolsToDock::All => f.write_str("All"),
            MolsToDock::Top(k) => write!(f, "{k}"),
        }
    }
}

/// Descending by score, NaN last.
fn by_score_descending(a: &MergedRecord, b: &MergedRecord) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    }
}

/// All merged rows, highest score first. A row's position is its index in
/// both output artifacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalRanking {
    rows: Vec<MergedRecord>,
}

impl GlobalRanking {
    /// Concatenate batches in order and stable-sort by score.
    pub fn from_batches(batches: Vec<MergedBatch>) -> Self {
        info!("Combining {} batches...", batches.len());
        let mut rows: Vec<MergedRecord> = batches.into_iter().flat_map(|b| b.rows).collect();

        info!("Done combining {} rows... Sorting!", rows.len());
        rows.sort_by(by_score_descending);
        Self { rows }
    }

    /// Keep the top `mols` rows. Returns the number of rows removed.
    pub fn truncate(&mut self, mols: MolsToDock) -> usize {
        let MolsToDock::Top(k) = mols else {
            return 0;
        };

        info!("Molecules to dock: {}", k);
        info!("Total molecules: {}", self.rows.len());

        if self.rows.len() <= k {
            info!("Total molecules do not exceed the number to dock -> saving all molecules");
            0
        } else {
            info!("Total molecules exceed the number to dock -> saving {} molecules", k);
            let removed = self.rows.len() - k;
            self.rows.truncate(k);
            removed
        }
    }

    pub fn rows(&self) -> &[MergedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, score: f64) -> MergedRecord {
        MergedRecord { id: id.to_string(), score, smile: format!("S{id}") }
    }

    fn batch(rows: Vec<MergedRecord>) -> MergedBatch {
        MergedBatch { name: "b".to_string(), rows }
    }

    fn ids(ranking: &GlobalRanking) -> Vec<&str> {
        ranking.rows().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_mols_to_dock_parsing() {
        assert_eq!("All".parse::<MolsToDock>().unwrap(), MolsToDock::All);
        assert_eq!("250".parse::<MolsToDock>().unwrap(), MolsToDock::Top(250));
        assert_eq!(MolsToDock::from_option(None).unwrap(), MolsToDock::All);
        assert!("all".parse::<MolsToDock>().is_err());
        assert!("-5".parse::<MolsToDock>().is_err());
    }

    #[test]
    fn test_ranking_is_descending_across_batches() {
        let ranking = GlobalRanking::from_batches(vec![
            batch(vec![row("m1", 0.9), row("m2", 0.3)]),
            batch(vec![row("m3", 0.7)]),
        ]);
        assert_eq!(ids(&ranking), vec!["m1", "m3", "m2"]);
    }

    #[test]
    fn test_ties_keep_concatenation_order() {
        let ranking = GlobalRanking::from_batches(vec![
            batch(vec![row("a", 0.5), row("b", 0.5)]),
            batch(vec![row("c", 0.5)]),
        ]);
        assert_eq!(ids(&ranking), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nan_scores_sort_last() {
        let ranking = GlobalRanking::from_batches(vec![batch(vec![
            row("nan", f64::NAN),
            row("low", -1.0),
            row("high", 2.0),
        ])]);
        assert_eq!(ids(&ranking), vec!["high", "low", "nan"]);
    }

    #[test]
    fn test_truncate_keeps_top_k() {
        let mut ranking = GlobalRanking::from_batches(vec![batch(vec![
            row("m1", 0.9),
            row("m2", 0.3),
            row("m3", 0.7),
        ])]);
        assert_eq!(ranking.truncate(MolsToDock::Top(2)), 1);
        assert_eq!(ids(&ranking), vec!["m1", "m3"]);
    }

    #[test]
    fn test_truncate_larger_than_total_keeps_all() {
        let mut ranking = GlobalRanking::from_batches(vec![batch(vec![row("m1", 0.9)])]);
        assert_eq!(ranking.truncate(MolsToDock::Top(10)), 0);
        assert_eq!(ranking.truncate(MolsToDock::All), 0);
        assert_eq!(ranking.len(), 1);
    }
}
