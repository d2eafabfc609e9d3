use crate::model::dataset::{Dataset, RowAccounting, Run};
use crate::model::params::FoldParams;

pub const FIELD_DELIMITER: char = ',';
pub const LABEL_SEPARATOR: &str = ",";
/// Stand-in for a zero, empty or unparsable abundance cell.
pub const MISSING_SENTINEL: f64 = 1.0;

/// Parses a header-prefixed comma separated table into aligned runs.
///
/// The first line is discarded. A cell is missing when it is absent,
/// unparsable, non-finite or exactly zero; missing cells become
/// [`MISSING_SENTINEL`] and flag the row as incomplete. Incomplete rows are
/// dropped unless `params.keep_incomplete` is set.
pub fn parse_table(text: &str, params: &FoldParams) -> Dataset {
    let mut a = params
        .a_cols
        .iter()
        .map(|&column| Run {
            column,
            values: Vec::new(),
        })
        .collect::<Vec<_>>();
    let mut b = params
        .b_cols
        .iter()
        .map(|&column| Run {
            column,
            values: Vec::new(),
        })
        .collect::<Vec<_>>();
    let mut labels = Vec::new();
    let mut rows = RowAccounting::default();

    let mut a_row = Vec::with_capacity(a.len());
    let mut b_row = Vec::with_capacity(b.len());

    for (idx, raw) in text.split('\n').enumerate().skip(1) {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        rows.data_lines += 1;
        let fields = line.split(FIELD_DELIMITER).collect::<Vec<_>>();

        let label = build_label(&fields, params.id_col, params.info_col);

        a_row.clear();
        b_row.clear();
        let mut incomplete = false;
        for run in &a {
            let (value, ok) = read_cell(&fields, run.column);
            incomplete |= !ok;
            a_row.push(value);
        }
        for run in &b {
            let (value, ok) = read_cell(&fields, run.column);
            incomplete |= !ok;
            b_row.push(value);
        }

        if incomplete {
            rows.incomplete += 1;
            if !params.keep_incomplete {
                rows.dropped += 1;
                tracing::debug!(line = idx + 1, label = %label, "dropping row with missing values");
                continue;
            }
        }

        for (run, &value) in a.iter_mut().zip(&a_row) {
            run.values.push(value);
        }
        for (run, &value) in b.iter_mut().zip(&b_row) {
            run.values.push(value);
        }
        labels.push(label);
        rows.retained += 1;
    }

    tracing::info!(
        data_lines = rows.data_lines,
        retained = rows.retained,
        incomplete = rows.incomplete,
        dropped = rows.dropped,
        "loaded abundance table"
    );

    Dataset { a, b, labels, rows }
}

fn field<'a>(fields: &[&'a str], column: usize) -> Option<&'a str> {
    column.checked_sub(1).and_then(|idx| fields.get(idx)).copied()
}

fn build_label(fields: &[&str], id_col: usize, info_col: Option<usize>) -> String {
    let mut label = field(fields, id_col).unwrap_or("").to_string();
    if let Some(col) = info_col {
        label.push_str(LABEL_SEPARATOR);
        label.push_str(field(fields, col).unwrap_or(""));
    }
    label
}

/// Returns the parsed value and whether it was present.
fn read_cell(fields: &[&str], column: usize) -> (f64, bool) {
    match field(fields, column).and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() && v != 0.0 => (v, true),
        _ => (MISSING_SENTINEL, false),
    }
}
