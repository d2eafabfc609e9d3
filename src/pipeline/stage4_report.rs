use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::pipeline::stage3_folds::Stage3Output;
use crate::report::summary::{RunSummary, render_summary_json};
use crate::report::{render_fold_table, render_pair_medians};

pub fn render_report(stage3: &Stage3Output) -> String {
    match stage3 {
        Stage3Output::Folds(table) => render_fold_table(table),
        Stage3Output::PairMedians(medians) => render_pair_medians(medians),
    }
}

pub fn n_output_rows(stage3: &Stage3Output) -> usize {
    match stage3 {
        Stage3Output::Folds(table) => table.rows.len(),
        Stage3Output::PairMedians(medians) => medians.len(),
    }
}

pub fn write_report<W: Write>(text: &str, sink: &mut W) -> io::Result<()> {
    sink.write_all(text.as_bytes())?;
    sink.flush()
}

/// Writes to `path`, or stdout when absent.
pub fn write_report_to(text: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            write_text(path, text)?;
            tracing::info!(path = %path.display(), "wrote fold report");
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(text, &mut lock)
        }
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), super::PipelineError> {
    let json = render_summary_json(summary)?;
    write_text(path, &json)?;
    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    write_report(text, &mut w)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
