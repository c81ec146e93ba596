use crate::{
    aggregate::{build_views, View},
    config::PipelineConfig,
    load::load_occurrences,
    process::clean_occurrences,
    report,
};
use anyhow::Result;
use std::io::Write;
use tracing::{error, info};

/// Printed, with the error chain appended, when any stage fails.
pub const FAILURE_PREFIX: &str = "Ocorreu um erro no carregamento do arquivo:";

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineSummary {
    pub initial_count: usize,
    pub final_count: usize,
    pub views: Vec<View>,
}

impl PipelineSummary {
    pub fn removed_count(&self) -> i64 {
        self.initial_count as i64 - self.final_count as i64
    }
}

/// Load, clean, aggregate and report. Each section is written to `out` as soon
/// as its stage finishes, so a late failure leaves the earlier sections printed.
pub fn run<W: Write>(config: &PipelineConfig, out: &mut W) -> Result<PipelineSummary> {
    let raw = load_occurrences(&config.input_path, &config.loader)?;
    let initial_count = raw.num_rows();
    report::write_load_summary(out, initial_count, &raw.schema())?;

    let cleaned = clean_occurrences(
        &raw,
        config.columns.as_slice(),
        &config.date_column,
        &config.brand_column,
    )?;
    let final_count = cleaned.num_rows();
    info!(initial_count, final_count, "cleaned occurrences");
    report::write_clean_summary(out, initial_count, final_count, &cleaned.schema())?;

    let views = build_views(&cleaned, config)?;
    for (i, view) in views.iter().enumerate() {
        report::write_view(out, i + 1, view)?;
    }

    Ok(PipelineSummary {
        initial_count,
        final_count,
        views,
    })
}

/// Run the pipeline and absorb any failure into a single printed message.
/// Only errors writing the failure message itself are returned.
pub fn execute<W: Write>(config: &PipelineConfig, out: &mut W) -> Result<Option<PipelineSummary>> {
    match run(config, out) {
        Ok(summary) => {
            info!(views = summary.views.len(), "report complete");
            Ok(Some(summary))
        }
        Err(e) => {
            error!(error = ?e, "pipeline failed");
            writeln!(out, "{} {:#}", FAILURE_PREFIX, e)?;
            Ok(None)
        }
    }
}
