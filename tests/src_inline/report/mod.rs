use super::*;
use crate::pipeline::stage3_folds::FoldRow;

#[test]
fn test_format_value() {
    assert_eq!(format_value(0.5), "0.5");
    assert_eq!(format_value(1.0), "1");
    assert_eq!(format_value(-0.125), "-0.125");
    assert_eq!(format_value(f64::NAN), "NaN");
    assert_eq!(format_value(f64::INFINITY), "Infinity");
    assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_fold_header() {
    assert_eq!(fold_header(1), "Protein,Fold0,AvgFold");
    assert_eq!(fold_header(3), "Protein,Fold0,Fold1,Fold2,AvgFold");
}

#[test]
fn test_render_fold_table() {
    let table = FoldTable {
        n_pairs: 2,
        rows: vec![
            FoldRow {
                label: "P1".to_string(),
                folds: vec![1.0, -0.5],
                avg_fold: 0.25,
            },
            FoldRow {
                label: "P2,kinase".to_string(),
                folds: vec![f64::NAN, 2.0],
                avg_fold: f64::NAN,
            },
        ],
    };
    assert_eq!(
        render_fold_table(&table),
        "Protein,Fold0,Fold1,AvgFold\nP1,1,-0.5,0.25\nP2,kinase,NaN,2,NaN\n"
    );
}

#[test]
fn test_render_empty_fold_table() {
    let table = FoldTable {
        n_pairs: 4,
        rows: Vec::new(),
    };
    assert_eq!(
        render_fold_table(&table),
        "Protein,Fold0,Fold1,Fold2,Fold3,AvgFold\n"
    );
}

#[test]
fn test_render_pair_medians() {
    let medians = vec![
        PairMedian {
            pair: 0,
            a_column: 2,
            b_column: 4,
            median_log_ratio: 0.0,
        },
        PairMedian {
            pair: 1,
            a_column: 2,
            b_column: 5,
            median_log_ratio: -0.25,
        },
    ];
    assert_eq!(
        render_pair_medians(&medians),
        "Pair,ACol,BCol,MedianLogRatio\n0,2,4,0\n1,2,5,-0.25\n"
    );
}
