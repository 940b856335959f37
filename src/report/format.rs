//! Formatted terminal output for analysis results.
//!
//! We keep formatting code in one place so:
//! - the engine code stays clean and testable
//! - output changes are localized (CLI summary, `show`, TUI status line)

use crate::domain::{
    AnalysisReport, ClassifierOutput, InputSummary, RawScores, ReportFile, SentimentLabel, Source, TextOrigin,
};

/// Format the full run summary (input shape + verdict + traits + per-model table).
pub fn format_summary(report: &AnalysisReport, raw: &RawScores, input: &InputSummary) -> String {
    let mut out = String::new();

    out.push_str("=== senti - Multi-Sentiment Analyzer ===\n");
    out.push_str(&format!("Input: {}\n", format_input(input)));
    out.push('\n');

    let label = report.consolidated.final_label;
    out.push_str(&format!("FINAL: {}\n", label.banner()));
    out.push_str(&format!("  {}\n", format_verdict(label)));
    out.push('\n');

    out.push_str("Additional sentiment traits:\n");
    let t = &report.traits;
    let left = [
        format!("Emotion      : {:?}", t.emotion),
        format!("Subjectivity : {:?}", t.subjectivity_label),
        format!("Intensity    : {:?}", t.intensity),
    ];
    let right = [
        format!("Confidence : {}%", t.confidence_percent),
        format!("Strength   : {:?}", t.strength),
        String::new(),
    ];
    for (l, r) in left.iter().zip(right.iter()) {
        out.push_str(format!("  {l:<28} {r}\n").trim_end());
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Per-model breakdown:\n");
    out.push_str(&format_breakdown(report, raw));
    out.push('\n');

    out.push_str(&format!(
        "Agreement: {}/3 models\n",
        report.consolidated.agreement_count
    ));

    out
}

/// Format a saved report file.
pub fn format_report_file(file: &ReportFile) -> String {
    let mut out = format_summary(&file.report, &file.raw, &file.input);
    out.push_str(&format!(
        "Generated: {} by {}\n",
        file.generated_at.to_rfc3339(),
        file.tool
    ));
    out
}

/// One-line verdict, e.g. for the TUI status bar.
pub fn format_verdict(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "POSITIVE :)",
        SentimentLabel::Negative => "NEGATIVE :(",
        SentimentLabel::Neutral => "NEUTRAL :|",
    }
}

pub fn format_input(input: &InputSummary) -> String {
    let origin = match &input.origin {
        TextOrigin::Typed => "typed".to_string(),
        TextOrigin::Document(path) => format!("document {}", path.display()),
    };
    format!(
        "{origin} | {} chars | {} words | {} chunk(s)",
        input.chars, input.words, input.chunks
    )
}

fn format_breakdown(report: &AnalysisReport, raw: &RawScores) -> String {
    let mut out = String::new();
    out.push_str(format!("  {:<3} {:<18} {:<9} {}\n", "src", "model", "label", "raw").trim_end());
    out.push('\n');
    out.push_str(format!("  {:-<3} {:-<18} {:-<9} {:-<40}\n", "", "", "", "").trim_end());
    out.push('\n');

    let outputs = raw.outputs();
    for (normalized, output) in report.per_model.iter().zip(outputs.iter()) {
        out.push_str(
            format!(
                "  {:<3} {:<18} {:<9} {}\n",
                normalized.source.tag(),
                normalized.source.display_name(),
                normalized.label.to_string(),
                format_raw(output),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Describe one raw classifier output.
pub fn format_raw(output: &ClassifierOutput) -> String {
    match output {
        ClassifierOutput::Binary(b) => {
            let label = b.label.as_deref().unwrap_or("-");
            if b.chunks.len() > 1 {
                format!("{label} @ {:.4} ({} chunks)", b.score, b.chunks.len())
            } else {
                format!("{label} @ {:.4}", b.score)
            }
        }
        ClassifierOutput::Polarity(p) => {
            format!("polarity={:+.3} subjectivity={:.3}", p.polarity, p.subjectivity)
        }
        ClassifierOutput::Compound(c) => format!(
            "compound={:+.4} (pos {:.2} neu {:.2} neg {:.2})",
            c.compound, c.pos, c.neu, c.neg
        ),
    }
}

/// Short label for a source column header.
pub fn source_heading(source: Source) -> String {
    format!("{} {}", source.tag(), source.display_name())
}
