use thiserror::Error;

use crate::input::InputError;
use crate::model::dataset::Dataset;
use crate::model::params::{FoldParams, ParamsError};
use crate::report::summary::RunSummary;

pub mod stage1_load;
pub mod stage2_normalize;
pub mod stage3_folds;
pub mod stage4_report;

use stage1_load::run_stage1;
use stage2_normalize::{Stage2Output, run_stage2};
use stage3_folds::{Stage3Output, run_stage3};
use stage4_report::{n_output_rows, render_report};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("summary serialization error: {0}")]
    Summary(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub dataset: Dataset,
    pub normalized: Stage2Output,
    pub folds: Stage3Output,
    pub report: String,
}

impl PipelineOutput {
    pub fn summary(&self, params: &FoldParams) -> RunSummary {
        RunSummary::new(
            params,
            self.dataset.rows,
            self.normalized.stats(),
            n_output_rows(&self.folds),
        )
    }
}

/// Load, normalize, fold and render. `text` is the complete input table.
pub fn run_pipeline(text: &str, params: &FoldParams) -> Result<PipelineOutput, PipelineError> {
    params.validate()?;
    let dataset = run_stage1(text, params)?;
    let normalized = run_stage2(&dataset, params);
    let folds = run_stage3(&dataset, &normalized, params);
    let report = render_report(&folds);
    Ok(PipelineOutput {
        dataset,
        normalized,
        folds,
        report,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
