//! Shared "analysis pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> classify (A, B, C) -> normalize -> consolidate -> traits -> report
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::time::Instant;

use crate::domain::{AnalysisReport, AnalyzeConfig, InputSummary, RawScores, TextOrigin};
use crate::engine::score_report;
use crate::error::AppError;
use crate::models::Classifiers;

/// All computed outputs of a single analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub report: AnalysisReport,
    pub raw: RawScores,
    pub input: InputSummary,
}

/// Reject input that has nothing to analyze.
pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::validation("Please provide some text."));
    }
    Ok(())
}

/// Execute the full analysis for one text.
///
/// Either returns a complete run or an error; there is no partial report.
pub fn analyze_text(
    classifiers: &Classifiers,
    config: &AnalyzeConfig,
    text: &str,
    origin: TextOrigin,
) -> Result<AnalysisRun, AppError> {
    // 1) Validate.
    validate_text(text)?;

    let input = InputSummary {
        chars: text.chars().count(),
        words: text.split_whitespace().count(),
        chunks: classifiers.chunk_count(text),
        origin,
    };

    // 2) Invoke the three classifiers.
    let started = Instant::now();
    let raw = classifiers.score(text, config.parallel)?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        chunks = input.chunks,
        parallel = config.parallel,
        "classifiers finished"
    );

    // 3) Normalize, consolidate, derive traits, assemble.
    let report = score_report(&raw);
    tracing::info!(
        label = %report.consolidated.final_label,
        agreement = report.consolidated.agreement_count,
        chars = input.chars,
        "analysis complete"
    );

    Ok(AnalysisRun { report, raw, input })
}
