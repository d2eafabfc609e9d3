use std::fmt::Write;

use crate::pipeline::stage3_folds::{FoldTable, PairMedian};

pub mod summary;

/// Shortest round-trip decimal; non-finite values as `NaN`, `Infinity`,
/// `-Infinity`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", v)
    }
}

pub fn fold_header(n_pairs: usize) -> String {
    let mut header = String::from("Protein,");
    for k in 0..n_pairs {
        let _ = write!(header, "Fold{},", k);
    }
    header.push_str("AvgFold");
    header
}

pub fn render_fold_table(table: &FoldTable) -> String {
    let mut out = fold_header(table.n_pairs);
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.label);
        out.push(',');
        for &fold in &row.folds {
            out.push_str(&format_value(fold));
            out.push(',');
        }
        out.push_str(&format_value(row.avg_fold));
        out.push('\n');
    }
    out
}

pub fn render_pair_medians(medians: &[PairMedian]) -> String {
    let mut out = String::from("Pair,ACol,BCol,MedianLogRatio\n");
    for m in medians {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            m.pair,
            m.a_column,
            m.b_column,
            format_value(m.median_log_ratio)
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
