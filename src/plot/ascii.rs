//! ASCII score gauges for terminal output.
//!
//! This is intentionally "dumb" (one fixed-width row per classifier), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Gauge elements:
//! - axis: `-`, center tick `|`
//! - neutral band of the source: `:`
//! - score marker: `o`

use crate::domain::{ClassifierOutput, RawScores, Source};
use crate::engine::{BINARY_MIN_CONFIDENCE, COMPOUND_NEUTRAL_BAND, POLARITY_NEUTRAL_BAND};

/// Render one gauge per classifier, scores mapped onto `[-1, 1]`.
pub fn render_score_gauges(raw: &RawScores, width: usize) -> String {
    let width = width.max(11);
    let mut out = String::new();
    out.push_str(&format!("Scores on [-1, 1] (width={width})\n"));
    for output in raw.outputs() {
        let source = output.source();
        out.push_str(&format!(
            "{} {:<16} [{}] {:+.3}\n",
            source.tag(),
            source.display_name(),
            gauge_row(output.signed_score(), neutral_band(&output), width),
            output.signed_score(),
        ));
    }
    out
}

/// Half-width of the band that normalizes to Neutral, in signed-score units.
fn neutral_band(output: &ClassifierOutput) -> f64 {
    match output.source() {
        Source::Binary => BINARY_MIN_CONFIDENCE,
        Source::Polarity => POLARITY_NEUTRAL_BAND,
        Source::Compound => COMPOUND_NEUTRAL_BAND,
    }
}

fn gauge_row(score: f64, band: f64, width: usize) -> String {
    let mut row = vec!['-'; width];
    let lo = map_x(-band, width);
    let hi = map_x(band, width);
    for cell in row.iter_mut().take(hi + 1).skip(lo) {
        *cell = ':';
    }
    row[map_x(0.0, width)] = '|';
    if score.is_finite() {
        row[map_x(score, width)] = 'o';
    }
    row.into_iter().collect()
}

fn map_x(v: f64, width: usize) -> usize {
    let u = ((v.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}
