mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod stats;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::input::read_input_text;
use crate::model::params::{FoldDirection, FoldParams, ParamsError, parse_column_list};
use crate::pipeline::stage4_report::{write_report_to, write_summary};
use crate::pipeline::{PipelineError, run_pipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliDirection {
    /// log2(scaled B / A)
    BOverA,
    /// log2(A / scaled B)
    AOverB,
}

impl From<CliDirection> for FoldDirection {
    fn from(dir: CliDirection) -> Self {
        match dir {
            CliDirection::BOverA => FoldDirection::BOverA,
            CliDirection::AOverB => FoldDirection::AOverB,
        }
    }
}

/// Robust run-pair normalization and log2 fold change between two groups
/// of abundance runs.
#[derive(Debug, Parser)]
#[command(name = "kira-foldnorm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input data file (CSV with a header line, optionally .gz)
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Group A data columns, 1-based, e.g. '2,3'
    #[arg(long)]
    set1: String,

    /// Group B data columns, 1-based, e.g. '4,5'
    #[arg(long)]
    set2: String,

    /// Gene/protein label column, 1-based
    #[arg(long = "gene-col")]
    gene_col: usize,

    /// Info column appended to the label, 1-based
    #[arg(long = "info-col", alias = "info-cols")]
    info_col: Option<usize>,

    /// Group rows by label before computing fold change
    #[arg(long)]
    group: bool,

    /// Use the median instead of the mean for scale factors
    #[arg(long)]
    median: bool,

    /// Keep rows with missing data (missing cells become 1)
    #[arg(long)]
    noskip: bool,

    /// Report the median log ratio of each normalized run pair instead of folds
    #[arg(long = "pair-medians", conflicts_with = "group")]
    pair_medians: bool,

    /// Force a fold polarity for either mode
    #[arg(long, value_enum)]
    direction: Option<CliDirection>,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_params(&self) -> Result<FoldParams, ParamsError> {
        let params = FoldParams {
            a_cols: parse_column_list(&self.set1)?,
            b_cols: parse_column_list(&self.set2)?,
            id_col: self.gene_col,
            info_col: self.info_col,
            group_by_identifier: self.group,
            use_median: self.median,
            keep_incomplete: self.noskip,
            pair_medians: self.pair_medians,
            direction: self.direction.map(FoldDirection::from),
        };
        params.validate()?;
        Ok(params)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let params = cli.to_params()?;
    tracing::info!(
        set1 = ?params.a_cols,
        set2 = ?params.b_cols,
        mode = ?params.report_mode(),
        estimator = ?params.estimator(),
        direction = ?params.fold_direction(),
        "starting fold-change run"
    );

    let text = read_input_text(&cli.input)?;
    let output = run_pipeline(&text, &params)?;

    write_report_to(&output.report, cli.out.as_deref())?;
    if let Some(path) = &cli.summary {
        write_summary(path, &output.summary(&params))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
