use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::table::MISSING_SENTINEL;
use super::{InputError, parse_table, read_input_text};
use crate::model::params::FoldParams;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_foldnorm_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn params(a_cols: Vec<usize>, b_cols: Vec<usize>) -> FoldParams {
    FoldParams {
        a_cols,
        b_cols,
        id_col: 1,
        info_col: None,
        group_by_identifier: false,
        use_median: false,
        keep_incomplete: false,
        pair_medians: false,
        direction: None,
    }
}

#[test]
fn test_parse_table_aligns_runs_and_labels() {
    let text = "Protein,A,B\ngeneA,10,20\ngeneB,5,5\n";
    let ds = parse_table(text, &params(vec![2], vec![3]));

    assert_eq!(ds.labels, vec!["geneA".to_string(), "geneB".to_string()]);
    assert_eq!(ds.a.len(), 1);
    assert_eq!(ds.b.len(), 1);
    assert_eq!(ds.a[0].column, 2);
    assert_eq!(ds.a[0].values, vec![10.0, 5.0]);
    assert_eq!(ds.b[0].values, vec![20.0, 5.0]);
    assert_eq!(ds.rows.data_lines, 2);
    assert_eq!(ds.rows.retained, 2);
    assert_eq!(ds.rows.dropped, 0);
}

#[test]
fn test_parse_table_multi_run_groups() {
    let text = "id,a1,a2,b1,b2,b3\nP1,1,2,3,4,5\nP2,6,7,8,9,10\n";
    let ds = parse_table(text, &params(vec![2, 3], vec![4, 5, 6]));
    assert_eq!(ds.a.len(), 2);
    assert_eq!(ds.b.len(), 3);
    assert_eq!(ds.a[1].values, vec![2.0, 7.0]);
    assert_eq!(ds.b[2].values, vec![5.0, 10.0]);
    for run in ds.a.iter().chain(ds.b.iter()) {
        assert_eq!(run.values.len(), ds.n_rows());
    }
}

#[test]
fn test_parse_table_drops_incomplete_rows() {
    let text = "id,a,b\ng1,0,3\ng2,,4\ng3,abc,5\ng4,2\ng5,1,2\ng6,NaN,2\n";
    let ds = parse_table(text, &params(vec![2], vec![3]));
    assert_eq!(ds.labels, vec!["g5".to_string()]);
    assert_eq!(ds.a[0].values, vec![1.0]);
    assert_eq!(ds.b[0].values, vec![2.0]);
    assert_eq!(ds.rows.data_lines, 6);
    assert_eq!(ds.rows.incomplete, 5);
    assert_eq!(ds.rows.dropped, 5);
    assert_eq!(ds.rows.retained, 1);
}

#[test]
fn test_parse_table_treats_infinite_cells_as_missing() {
    let text = "id,a,b\np1,inf,2\np2,2,4\np3,3,-inf\np4,+infinity,1\np5,3,6\n";
    let ds = parse_table(text, &params(vec![2], vec![3]));
    assert_eq!(ds.labels, vec!["p2".to_string(), "p5".to_string()]);
    assert_eq!(ds.rows.incomplete, 3);
    assert_eq!(ds.rows.dropped, 3);

    let mut p = params(vec![2], vec![3]);
    p.keep_incomplete = true;
    let ds = parse_table(text, &p);
    assert_eq!(ds.a[0].values[0], MISSING_SENTINEL);
    assert_eq!(ds.b[0].values[2], MISSING_SENTINEL);
    assert_eq!(ds.a[0].values[3], MISSING_SENTINEL);
}

#[test]
fn test_parse_table_keeps_incomplete_rows_with_sentinel() {
    let text = "id,a,b\ng1,0,3\ng2,,4\ng3,2.5,x\n";
    let mut p = params(vec![2], vec![3]);
    p.keep_incomplete = true;
    let ds = parse_table(text, &p);
    assert_eq!(ds.n_rows(), 3);
    assert_eq!(ds.a[0].values, vec![MISSING_SENTINEL, MISSING_SENTINEL, 2.5]);
    assert_eq!(ds.b[0].values, vec![3.0, 4.0, MISSING_SENTINEL]);
    assert_eq!(ds.rows.incomplete, 3);
    assert_eq!(ds.rows.dropped, 0);
}

#[test]
fn test_parse_table_info_column_joins_label() {
    let text = "id,desc,a,b\nP1,kinase,1,2\nP2,,3,4\n";
    let mut p = params(vec![3], vec![4]);
    p.info_col = Some(2);
    let ds = parse_table(text, &p);
    assert_eq!(ds.labels, vec!["P1,kinase".to_string(), "P2,".to_string()]);
}

#[test]
fn test_parse_table_crlf_blank_lines_and_whitespace() {
    let text = "id,a,b\r\nP1, 4 ,8\r\n\r\n\nP2,1e1,2.5\r\n";
    let ds = parse_table(text, &params(vec![2], vec![3]));
    assert_eq!(ds.labels, vec!["P1".to_string(), "P2".to_string()]);
    assert_eq!(ds.a[0].values, vec![4.0, 10.0]);
    assert_eq!(ds.b[0].values, vec![8.0, 2.5]);
    assert_eq!(ds.rows.data_lines, 2);
}

#[test]
fn test_parse_table_header_only() {
    let ds = parse_table("id,a,b\n", &params(vec![2], vec![3]));
    assert_eq!(ds.n_rows(), 0);
    assert!(ds.a[0].values.is_empty());
}

#[test]
fn test_read_input_text_plain_and_gz() {
    let dir = make_temp_dir();
    let contents = "id,a,b\nP1,1,2\n";

    let plain = dir.join("table.csv");
    write_file(&plain, contents);
    assert_eq!(read_input_text(&plain).unwrap(), contents);

    let gz = dir.join("table.csv.gz");
    let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
    assert_eq!(read_input_text(&gz).unwrap(), contents);
}

#[test]
fn test_read_input_text_missing_file() {
    let dir = make_temp_dir();
    let err = read_input_text(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}

#[test]
fn test_read_input_text_invalid_utf8() {
    let dir = make_temp_dir();
    let path = dir.join("bad.csv");
    fs::write(&path, [0x66u8, 0xff, 0xfe, 0x0a]).unwrap();
    let err = read_input_text(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}
