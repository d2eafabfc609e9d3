use serde::Serialize;

/// One measurement column of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// 1-based source column.
    pub column: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowAccounting {
    pub data_lines: usize,
    pub retained: usize,
    pub incomplete: usize,
    pub dropped: usize,
}

/// Aligned group A/B runs and row labels. Every run has `labels.len()`
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub a: Vec<Run>,
    pub b: Vec<Run>,
    pub labels: Vec<String>,
    pub rows: RowAccounting,
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }
}
