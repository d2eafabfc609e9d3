use serde::Serialize;

use crate::model::dataset::{Dataset, Run};
use crate::model::params::FoldParams;
use crate::stats::{ScaleEstimator, log_ratio, outlier_filter, scale};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStats {
    pub pair: usize,
    pub a_run: usize,
    pub b_run: usize,
    pub a_column: usize,
    pub b_column: usize,
    pub n_ratios: usize,
    pub n_retained: usize,
    pub scale_factor: f64,
}

/// One A × B combination: the untouched A run and the B run scaled onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPair {
    pub raw_a: Vec<f64>,
    pub scaled_b: Vec<f64>,
    pub stats: PairStats,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    /// A-major, B-minor.
    pub pairs: Vec<NormalizedPair>,
}

impl Stage2Output {
    /// Flat `[a0, b0', a0, b1', ...]` view, `2 * |A| * |B|` entries.
    pub fn result_list(&self) -> Vec<&[f64]> {
        let mut out = Vec::with_capacity(self.pairs.len() * 2);
        for pair in &self.pairs {
            out.push(pair.raw_a.as_slice());
            out.push(pair.scaled_b.as_slice());
        }
        out
    }

    pub fn stats(&self) -> Vec<PairStats> {
        self.pairs.iter().map(|p| p.stats.clone()).collect()
    }
}

/// Scale factor aligning `b` onto `a`, plus the number of log ratios that
/// survived outlier filtering.
pub fn scale_factor(a: &[f64], b: &[f64], estimator: ScaleEstimator) -> (f64, usize) {
    let filtered = outlier_filter(&log_ratio(a, b));
    (estimator.estimate(&filtered), filtered.len())
}

pub fn normalize_pair(
    a: &Run,
    b: &Run,
    estimator: ScaleEstimator,
    (pair, a_run, b_run): (usize, usize, usize),
) -> NormalizedPair {
    let (factor, n_retained) = scale_factor(&a.values, &b.values, estimator);
    let stats = PairStats {
        pair,
        a_run,
        b_run,
        a_column: a.column,
        b_column: b.column,
        n_ratios: a.values.len(),
        n_retained,
        scale_factor: factor,
    };
    if factor.is_finite() {
        tracing::debug!(
            pair,
            a_column = a.column,
            b_column = b.column,
            n_ratios = stats.n_ratios,
            n_retained,
            scale_factor = factor,
            "normalized run pair"
        );
    } else {
        tracing::warn!(
            pair,
            a_column = a.column,
            b_column = b.column,
            n_retained,
            "scale factor is not finite; folds for this pair will be non-finite"
        );
    }
    NormalizedPair {
        raw_a: a.values.clone(),
        scaled_b: scale(&b.values, factor),
        stats,
    }
}

pub fn run_stage2(dataset: &Dataset, params: &FoldParams) -> Stage2Output {
    let estimator = params.estimator();
    let mut pairs = Vec::with_capacity(params.n_pairs());
    for (x, a) in dataset.a.iter().enumerate() {
        for (y, b) in dataset.b.iter().enumerate() {
            let ids = (pairs.len(), x, y);
            pairs.push(normalize_pair(a, b, estimator, ids));
        }
    }
    tracing::info!(
        pairs = pairs.len(),
        estimator = ?estimator,
        "normalized all run pairs"
    );
    Stage2Output { pairs }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
