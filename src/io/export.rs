//! Read/write report JSON files.
//!
//! A report file is the portable representation of one analysis:
//! - the consolidated report (final label, traits, per-model breakdown)
//! - the raw classifier scores behind it
//! - a short description of the analyzed input
//!
//! The schema is defined by `domain::ReportFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::AnalysisRun;
use crate::domain::ReportFile;
use crate::error::AppError;

/// Build the export envelope for a finished run.
pub fn report_file(run: &AnalysisRun) -> ReportFile {
    ReportFile {
        tool: "senti".to_string(),
        generated_at: Utc::now(),
        input: run.input.clone(),
        report: run.report.clone(),
        raw: run.raw.clone(),
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, run: &AnalysisRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &report_file(run))
        .map_err(|e| AppError::io(format!("Failed to write report JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::validation(format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile = serde_json::from_reader(file)
        .map_err(|e| AppError::validation(format!("Invalid report JSON: {e}")))?;
    Ok(report)
}

/// Render a report file as a JSON string (for `--json`).
pub fn report_json_string(run: &AnalysisRun) -> Result<String, AppError> {
    serde_json::to_string_pretty(&report_file(run))
        .map_err(|e| AppError::io(format!("Failed to serialize report: {e}")))
}
