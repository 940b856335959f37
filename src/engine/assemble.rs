//! Report assembly and the pure end-to-end scoring path.

use crate::domain::{AnalysisReport, ConsolidatedResult, NormalizedSentiment, RawScores, TraitBundle};
use crate::engine::{consolidate, derive_traits, normalize};

/// Package the engine outputs into one report.
///
/// The per-model breakdown is reordered to A, B, C whatever order the
/// sentiments arrive in.
pub fn assemble(
    mut per_model: [NormalizedSentiment; 3],
    consolidated: ConsolidatedResult,
    traits: TraitBundle,
) -> AnalysisReport {
    per_model.sort_by_key(|s| s.source.index());
    AnalysisReport {
        consolidated,
        traits,
        per_model,
    }
}

/// Run normalize -> consolidate -> derive traits -> assemble on raw scores.
pub fn score_report(raw: &RawScores) -> AnalysisReport {
    let per_model = raw.outputs().map(|out| normalize(&out));
    let consolidated = consolidate(&per_model);
    let traits = derive_traits(
        raw.compound.compound,
        raw.polarity.subjectivity,
        consolidated.agreement_count,
    );
    assemble(per_model, consolidated, traits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BinaryScore, CompoundScore, Emotion, Intensity, PolarityScore, SentimentLabel, Source, Strength,
        SubjectivityLabel,
    };

    fn raw(binary: (&str, f64), polarity: f64, subjectivity: f64, compound: f64) -> RawScores {
        RawScores {
            binary: BinaryScore {
                label: Some(binary.0.to_string()),
                score: binary.1,
                chunks: Vec::new(),
            },
            polarity: PolarityScore { polarity, subjectivity },
            compound: CompoundScore {
                compound,
                pos: 0.0,
                neu: 0.0,
                neg: 0.0,
            },
        }
    }

    #[test]
    fn assemble_orders_by_source() {
        let per_model = [
            NormalizedSentiment {
                source: Source::Compound,
                label: SentimentLabel::Negative,
            },
            NormalizedSentiment {
                source: Source::Binary,
                label: SentimentLabel::Positive,
            },
            NormalizedSentiment {
                source: Source::Polarity,
                label: SentimentLabel::Neutral,
            },
        ];
        let consolidated = consolidate(&per_model);
        let traits = derive_traits(0.0, 0.0, consolidated.agreement_count);
        let report = assemble(per_model, consolidated, traits);
        let order: Vec<Source> = report.per_model.iter().map(|s| s.source).collect();
        assert_eq!(order, Source::ALL.to_vec());
        assert_eq!(report.per_model[0].label, SentimentLabel::Positive);
    }

    #[test]
    fn unanimous_strong_positive() {
        let report = score_report(&raw(("POSITIVE", 0.99), 0.2, 0.7, 0.8));
        assert_eq!(report.consolidated.final_label, SentimentLabel::Positive);
        assert_eq!(report.consolidated.agreement_count, 3);
        assert_eq!(report.traits.emotion, Emotion::Joy);
        assert_eq!(report.traits.subjectivity_label, SubjectivityLabel::Subjective);
        assert_eq!(report.traits.intensity, Intensity::High);
        assert_eq!(report.traits.strength, Strength::Strong);
        assert_eq!(report.traits.confidence_percent, 100);
    }

    #[test]
    fn weak_negative_dissent_stays_neutral() {
        // Binary below confidence -> Neutral, polarity 0 -> Neutral, compound -0.05 -> Negative.
        let report = score_report(&raw(("NEGATIVE", 0.55), 0.0, 0.1, -0.05));
        let labels: Vec<SentimentLabel> = report.per_model.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![SentimentLabel::Neutral, SentimentLabel::Neutral, SentimentLabel::Negative]
        );
        assert_eq!(report.consolidated.final_label, SentimentLabel::Neutral);
        assert_eq!(report.consolidated.agreement_count, 2);
        assert_eq!(report.traits.emotion, Emotion::Neutral);
        assert_eq!(report.traits.intensity, Intensity::Low);
        assert_eq!(report.traits.confidence_percent, 66);
    }

    #[test]
    fn three_way_split_is_neutral_regardless_of_traits() {
        // Positive (binary), Negative (polarity), Neutral (compound).
        for (compound, subjectivity) in [(0.0, 0.9), (0.04, 0.0), (-0.04, 0.6)] {
            let report = score_report(&raw(("POSITIVE", 0.95), -0.5, subjectivity, compound));
            assert_eq!(report.consolidated.final_label, SentimentLabel::Neutral);
            assert_eq!(report.consolidated.agreement_count, 1);
            assert_eq!(report.traits.confidence_percent, 33);
        }
    }
}
