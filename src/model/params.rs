use serde::Serialize;
use thiserror::Error;

use crate::stats::ScaleEstimator;

/// Polarity of a reported fold change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldDirection {
    /// `log2(scaled_b / a)`, the per-row default.
    BOverA,
    /// `log2(a / scaled_b)`, the grouped default.
    AOverB,
}

impl FoldDirection {
    pub fn fold(self, a: f64, scaled_b: f64) -> f64 {
        match self {
            FoldDirection::BOverA => (scaled_b / a).log2(),
            FoldDirection::AOverB => (a / scaled_b).log2(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    PerRow,
    Grouped,
    PairMedians,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("missing {0} columns")]
    MissingColumns(&'static str),
    #[error("column indices are 1-based; got 0 for {0}")]
    ZeroColumn(&'static str),
    #[error("invalid column list '{0}' (expected e.g. '2,3')")]
    InvalidColumnList(String),
    #[error("--group and --pair-medians cannot be combined")]
    ConflictingModes,
}

/// Immutable run configuration. Built once from the CLI and passed by
/// reference to every stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldParams {
    /// 1-based columns of group A runs.
    pub a_cols: Vec<usize>,
    /// 1-based columns of group B runs.
    pub b_cols: Vec<usize>,
    pub id_col: usize,
    pub info_col: Option<usize>,
    pub group_by_identifier: bool,
    pub use_median: bool,
    pub keep_incomplete: bool,
    pub pair_medians: bool,
    pub direction: Option<FoldDirection>,
}

impl FoldParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.a_cols.is_empty() {
            return Err(ParamsError::MissingColumns("set1"));
        }
        if self.b_cols.is_empty() {
            return Err(ParamsError::MissingColumns("set2"));
        }
        if self.a_cols.contains(&0) {
            return Err(ParamsError::ZeroColumn("set1"));
        }
        if self.b_cols.contains(&0) {
            return Err(ParamsError::ZeroColumn("set2"));
        }
        if self.id_col == 0 {
            return Err(ParamsError::ZeroColumn("gene-col"));
        }
        if self.info_col == Some(0) {
            return Err(ParamsError::ZeroColumn("info-col"));
        }
        if self.group_by_identifier && self.pair_medians {
            return Err(ParamsError::ConflictingModes);
        }
        Ok(())
    }

    pub fn estimator(&self) -> ScaleEstimator {
        if self.use_median {
            ScaleEstimator::MedianExp
        } else {
            ScaleEstimator::MeanExp
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        if self.pair_medians {
            ReportMode::PairMedians
        } else if self.group_by_identifier {
            ReportMode::Grouped
        } else {
            ReportMode::PerRow
        }
    }

    /// Fold polarity for the active mode. Per-row and grouped modes keep
    /// their historical polarities unless an override is given.
    pub fn fold_direction(&self) -> FoldDirection {
        match (self.direction, self.report_mode()) {
            (Some(dir), _) => dir,
            (None, ReportMode::Grouped) => FoldDirection::AOverB,
            (None, _) => FoldDirection::BOverA,
        }
    }

    pub fn n_pairs(&self) -> usize {
        self.a_cols.len() * self.b_cols.len()
    }
}

/// Parses a comma separated list of 1-based column indices, e.g. `2,3`.
pub fn parse_column_list(raw: &str) -> Result<Vec<usize>, ParamsError> {
    let mut out = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let col = part
            .parse::<usize>()
            .map_err(|_| ParamsError::InvalidColumnList(raw.to_string()))?;
        out.push(col);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/params.rs"]
mod tests;
