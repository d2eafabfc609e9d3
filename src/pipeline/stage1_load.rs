use crate::input::{InputError, parse_table};
use crate::model::dataset::Dataset;
use crate::model::params::FoldParams;

pub fn run_stage1(text: &str, params: &FoldParams) -> Result<Dataset, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty("no header line".to_string()));
    }
    let dataset = parse_table(text, params);
    if dataset.n_rows() == 0 {
        tracing::warn!(
            data_lines = dataset.rows.data_lines,
            "no rows retained; report will contain only a header"
        );
    }
    Ok(dataset)
}
