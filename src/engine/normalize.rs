//! Per-source label normalization.
//!
//! Thresholds are fixed; they are part of the output contract and are not
//! exposed as flags.

use crate::domain::{
    BinaryScore, ChunkVote, ClassifierOutput, CompoundScore, NormalizedSentiment, PolarityScore, SentimentLabel,
};

/// Minimum binary confidence below which the verdict counts as Neutral.
pub const BINARY_MIN_CONFIDENCE: f64 = 0.6;
/// Polarity must exceed this magnitude (strictly) to leave Neutral.
pub const POLARITY_NEUTRAL_BAND: f64 = 0.1;
/// Compound score must reach this magnitude (inclusive) to leave Neutral.
pub const COMPOUND_NEUTRAL_BAND: f64 = 0.05;

/// Normalize one raw classifier output.
pub fn normalize(output: &ClassifierOutput) -> NormalizedSentiment {
    let label = match output {
        ClassifierOutput::Binary(b) => normalize_binary(b),
        ClassifierOutput::Polarity(p) => normalize_polarity(p),
        ClassifierOutput::Compound(c) => normalize_compound(c),
    };
    NormalizedSentiment {
        source: output.source(),
        label,
    }
}

pub fn normalize_binary(score: &BinaryScore) -> SentimentLabel {
    if score.score < BINARY_MIN_CONFIDENCE {
        SentimentLabel::Neutral
    } else if score.label.as_deref() == Some("POSITIVE") {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

pub fn normalize_polarity(score: &PolarityScore) -> SentimentLabel {
    if score.polarity > POLARITY_NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if score.polarity < -POLARITY_NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn normalize_compound(score: &CompoundScore) -> SentimentLabel {
    if score.compound >= COMPOUND_NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if score.compound <= -COMPOUND_NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Collapse per-chunk binary votes into one `BinaryScore`.
///
/// The modal label wins (ties go to the label seen first); the score is the
/// mean confidence of the chunks that voted for it. An empty vote list yields
/// an absent label with zero confidence, which normalizes to Neutral.
pub fn vote_chunks(votes: Vec<ChunkVote>) -> BinaryScore {
    // (label, count, score_sum) in first-seen order.
    let mut tally: Vec<(Option<&str>, usize, f64)> = Vec::new();
    for vote in &votes {
        let key = vote.label.as_deref();
        match tally.iter_mut().find(|(l, _, _)| *l == key) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += vote.score;
            }
            None => tally.push((key, 1, vote.score)),
        }
    }

    let mut best: Option<(Option<&str>, usize, f64)> = None;
    for entry in tally {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }

    let (label, score) = match best {
        Some((label, count, sum)) => (label.map(str::to_string), sum / count as f64),
        None => (None, 0.0),
    };

    BinaryScore {
        label,
        score,
        chunks: votes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(label: Option<&str>, score: f64) -> BinaryScore {
        BinaryScore {
            label: label.map(str::to_string),
            score,
            chunks: Vec::new(),
        }
    }

    fn vote(label: &str, score: f64) -> ChunkVote {
        ChunkVote {
            label: Some(label.to_string()),
            score,
        }
    }

    #[test]
    fn binary_below_confidence_is_neutral() {
        assert_eq!(normalize_binary(&binary(Some("POSITIVE"), 0.59)), SentimentLabel::Neutral);
        assert_eq!(normalize_binary(&binary(Some("NEGATIVE"), 0.2)), SentimentLabel::Neutral);
    }

    #[test]
    fn binary_at_threshold_takes_label() {
        assert_eq!(normalize_binary(&binary(Some("POSITIVE"), 0.6)), SentimentLabel::Positive);
        assert_eq!(normalize_binary(&binary(Some("NEGATIVE"), 0.99)), SentimentLabel::Negative);
    }

    #[test]
    fn binary_without_label_is_negative_when_confident() {
        assert_eq!(normalize_binary(&binary(None, 0.9)), SentimentLabel::Negative);
    }

    #[test]
    fn polarity_band_is_exclusive() {
        let p = |polarity| PolarityScore {
            polarity,
            subjectivity: 0.5,
        };
        assert_eq!(normalize_polarity(&p(0.1)), SentimentLabel::Neutral);
        assert_eq!(normalize_polarity(&p(-0.1)), SentimentLabel::Neutral);
        assert_eq!(normalize_polarity(&p(0.11)), SentimentLabel::Positive);
        assert_eq!(normalize_polarity(&p(-0.11)), SentimentLabel::Negative);
    }

    #[test]
    fn compound_band_is_inclusive() {
        let c = |compound| CompoundScore {
            compound,
            pos: 0.0,
            neu: 1.0,
            neg: 0.0,
        };
        assert_eq!(normalize_compound(&c(0.05)), SentimentLabel::Positive);
        assert_eq!(normalize_compound(&c(-0.05)), SentimentLabel::Negative);
        assert_eq!(normalize_compound(&c(0.049)), SentimentLabel::Neutral);
        assert_eq!(normalize_compound(&c(-0.049)), SentimentLabel::Neutral);
    }

    #[test]
    fn normalize_keeps_source() {
        let out = ClassifierOutput::Polarity(PolarityScore {
            polarity: 0.5,
            subjectivity: 0.2,
        });
        let n = normalize(&out);
        assert_eq!(n.source, crate::domain::Source::Polarity);
        assert_eq!(n.label, SentimentLabel::Positive);
    }

    #[test]
    fn chunk_vote_picks_modal_label() {
        let votes = vec![
            vote("NEGATIVE", 0.7),
            vote("POSITIVE", 0.9),
            vote("POSITIVE", 0.8),
        ];
        let score = vote_chunks(votes);
        assert_eq!(score.label.as_deref(), Some("POSITIVE"));
        assert!((score.score - 0.85).abs() < 1e-12);
        assert_eq!(score.chunks.len(), 3);
    }

    #[test]
    fn chunk_vote_tie_goes_to_first_seen() {
        let votes = vec![
            vote("NEGATIVE", 0.7),
            vote("POSITIVE", 0.99),
            vote("POSITIVE", 0.98),
            vote("NEGATIVE", 0.9),
        ];
        let score = vote_chunks(votes);
        assert_eq!(score.label.as_deref(), Some("NEGATIVE"));
        assert!((score.score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn empty_chunk_vote_normalizes_to_neutral() {
        let score = vote_chunks(Vec::new());
        assert_eq!(score.label, None);
        assert_eq!(normalize_binary(&score), SentimentLabel::Neutral);
    }
}
