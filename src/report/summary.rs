use serde::Serialize;

use crate::model::dataset::RowAccounting;
use crate::model::params::{FoldDirection, FoldParams, ReportMode};
use crate::pipeline::stage2_normalize::PairStats;
use crate::stats::ScaleEstimator;

/// Machine-readable account of one run, written next to the fold report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub params: FoldParams,
    pub mode: ReportMode,
    pub estimator: ScaleEstimator,
    pub direction: FoldDirection,
    pub rows: RowAccounting,
    pub n_pairs: usize,
    pub n_output_rows: usize,
    pub pairs: Vec<PairStats>,
}

impl RunSummary {
    pub fn new(
        params: &FoldParams,
        rows: RowAccounting,
        pairs: Vec<PairStats>,
        n_output_rows: usize,
    ) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            params: params.clone(),
            mode: params.report_mode(),
            estimator: params.estimator(),
            direction: params.fold_direction(),
            rows,
            n_pairs: pairs.len(),
            n_output_rows,
            pairs,
        }
    }
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/summary.rs"]
mod tests;
