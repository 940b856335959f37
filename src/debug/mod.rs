//! Debug bundle writer for inspecting classifier outputs and consolidation.

use std::fmt::Write as _;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::AnalysisRun;
use crate::engine::{magnitude_tier, normalize};
use crate::error::AppError;
use crate::report::{format_input, format_raw};

/// Default directory for debug bundles (relative to the working directory).
pub const DEFAULT_DEBUG_DIR: &str = "debug";

/// Characters of input text reproduced in the bundle.
const EXCERPT_CHARS: usize = 400;

pub fn write_debug_bundle(run: &AnalysisRun, text: &str, dir: &Path) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::io(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S%3f");
    let path = dir.join(format!("senti_debug_{ts}.md"));

    let body = render_bundle(run, text).map_err(|e| AppError::io(format!("Failed to render debug bundle: {e}")))?;
    std::fs::write(&path, body).map_err(|e| AppError::io(format!("Failed to write debug file: {e}")))?;

    tracing::info!(path = %path.display(), "wrote debug bundle");
    Ok(path)
}

fn render_bundle(run: &AnalysisRun, text: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let report = &run.report;

    writeln!(out, "# senti debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- input: {}", format_input(&run.input))?;

    writeln!(out, "\n## Input excerpt")?;
    writeln!(out, "```")?;
    let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
    writeln!(out, "{excerpt}")?;
    if text.chars().count() > EXCERPT_CHARS {
        writeln!(out, "[... truncated]")?;
    }
    writeln!(out, "```")?;

    writeln!(out, "\n## Binary classifier chunks")?;
    writeln!(out, "| chunk | label | score |")?;
    writeln!(out, "| - | - | - |")?;
    for (idx, vote) in run.raw.binary.chunks.iter().enumerate() {
        writeln!(
            out,
            "| {idx} | {} | {:.6} |",
            vote.label.as_deref().unwrap_or("-"),
            vote.score
        )?;
    }
    writeln!(
        out,
        "- modal label: {} (mean score {:.6})",
        run.raw.binary.label.as_deref().unwrap_or("-"),
        run.raw.binary.score
    )?;

    writeln!(out, "\n## Normalization")?;
    writeln!(out, "| source | model | raw | label |")?;
    writeln!(out, "| - | - | - | - |")?;
    for output in run.raw.outputs() {
        let normalized = normalize(&output);
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            normalized.source.tag(),
            normalized.source.display_name(),
            format_raw(&output),
            normalized.label
        )?;
    }

    writeln!(out, "\n## Consolidation")?;
    writeln!(out, "- final: {}", report.consolidated.final_label)?;
    writeln!(out, "- agreement: {}/3", report.consolidated.agreement_count)?;

    writeln!(out, "\n## Traits")?;
    writeln!(
        out,
        "- compound: {:+.4} (tier {:?})",
        run.raw.compound.compound,
        magnitude_tier(run.raw.compound.compound)
    )?;
    writeln!(out, "- subjectivity: {:.4}", run.raw.polarity.subjectivity)?;
    writeln!(out, "- emotion: {:?}", report.traits.emotion)?;
    writeln!(out, "- subjectivity label: {:?}", report.traits.subjectivity_label)?;
    writeln!(out, "- intensity: {:?}", report.traits.intensity)?;
    writeln!(out, "- strength: {:?}", report.traits.strength)?;
    writeln!(out, "- confidence: {}%", report.traits.confidence_percent)?;

    Ok(out)
}
