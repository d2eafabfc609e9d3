use std::collections::HashMap;

use crate::model::dataset::Dataset;
use crate::model::params::{FoldDirection, FoldParams, ReportMode};
use crate::pipeline::stage2_normalize::{NormalizedPair, Stage2Output};
use crate::stats::{average, log_ratio, median};

#[derive(Debug, Clone, PartialEq)]
pub struct FoldRow {
    pub label: String,
    pub folds: Vec<f64>,
    pub avg_fold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoldTable {
    pub n_pairs: usize,
    pub rows: Vec<FoldRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairMedian {
    pub pair: usize,
    pub a_column: usize,
    pub b_column: usize,
    pub median_log_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage3Output {
    Folds(FoldTable),
    PairMedians(Vec<PairMedian>),
}

/// One fold row per retained input row.
pub fn per_row_folds(
    labels: &[String],
    pairs: &[NormalizedPair],
    direction: FoldDirection,
) -> FoldTable {
    let rows = labels
        .iter()
        .enumerate()
        .map(|(k, label)| {
            let folds = pairs
                .iter()
                .map(|p| direction.fold(p.raw_a[k], p.scaled_b[k]))
                .collect::<Vec<_>>();
            FoldRow {
                label: label.clone(),
                avg_fold: average(&folds),
                folds,
            }
        })
        .collect();
    FoldTable {
        n_pairs: pairs.len(),
        rows,
    }
}

/// Identifier-level sums over every row sharing a label, laid out like the
/// normalized result list (`[a0, b0', a1, b1', ...]`).
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierGroup {
    pub label: String,
    pub sums: Vec<f64>,
}

/// Groups in order of first appearance. `result_list` is the flat
/// normalized result list; every entry is indexed by row.
pub fn group_sums(labels: &[String], result_list: &[&[f64]]) -> Vec<IdentifierGroup> {
    let mut groups: Vec<IdentifierGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (k, label) in labels.iter().enumerate() {
        let slot = *index.entry(label.as_str()).or_insert_with(|| {
            groups.push(IdentifierGroup {
                label: label.clone(),
                sums: vec![0.0; result_list.len()],
            });
            groups.len() - 1
        });
        for (sum, entry) in groups[slot].sums.iter_mut().zip(result_list) {
            *sum += entry[k];
        }
    }
    groups
}

/// Sums first, then one fold per pair from the summed abundances.
pub fn grouped_folds(
    labels: &[String],
    stage2: &Stage2Output,
    direction: FoldDirection,
) -> FoldTable {
    let groups = group_sums(labels, &stage2.result_list());
    tracing::info!(
        rows = labels.len(),
        identifiers = groups.len(),
        "grouped rows by identifier"
    );
    let rows = groups
        .into_iter()
        .map(|g| {
            let folds = g
                .sums
                .chunks_exact(2)
                .map(|s| direction.fold(s[0], s[1]))
                .collect::<Vec<_>>();
            FoldRow {
                label: g.label,
                avg_fold: average(&folds),
                folds,
            }
        })
        .collect();
    FoldTable {
        n_pairs: stage2.pairs.len(),
        rows,
    }
}

/// Median `log2(a / scaled_b)` per pair; close to zero when normalization
/// removed the run-to-run drift.
pub fn pair_medians(pairs: &[NormalizedPair]) -> Vec<PairMedian> {
    pairs
        .iter()
        .map(|p| PairMedian {
            pair: p.stats.pair,
            a_column: p.stats.a_column,
            b_column: p.stats.b_column,
            median_log_ratio: median(&log_ratio(&p.raw_a, &p.scaled_b)),
        })
        .collect()
}

pub fn run_stage3(dataset: &Dataset, stage2: &Stage2Output, params: &FoldParams) -> Stage3Output {
    let direction = params.fold_direction();
    match params.report_mode() {
        ReportMode::PerRow => {
            Stage3Output::Folds(per_row_folds(&dataset.labels, &stage2.pairs, direction))
        }
        ReportMode::Grouped => {
            Stage3Output::Folds(grouped_folds(&dataset.labels, stage2, direction))
        }
        ReportMode::PairMedians => Stage3Output::PairMedians(pair_medians(&stage2.pairs)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_folds.rs"]
mod tests;
