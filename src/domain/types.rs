//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the classifier adapters and the engine
//! - printed as JSON or exported to a report file
//! - rendered by the CLI and the TUI without extra mapping

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text shown in the TUI input area before the user types anything.
pub const DEFAULT_SAMPLE_TEXT: &str = "i am very happy today";

/// Maximum characters sent to the binary classifier in one call.
pub const DEFAULT_CHUNK_CHARS: usize = 512;

/// Inference endpoint serving `distilbert-base-uncased-finetuned-sst-2-english`.
pub const DEFAULT_HUB_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// The three classifiers the engine is wired to.
///
/// The order of `Source::ALL` is the display order of the per-model breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Source A: binary POSITIVE/NEGATIVE transformer classifier with a confidence.
    Binary,
    /// Source B: pattern-lexicon polarity + subjectivity.
    Polarity,
    /// Source C: VADER compound score.
    Compound,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Binary, Source::Polarity, Source::Compound];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Source::Binary => "DistilBERT SST-2",
            Source::Polarity => "Pattern lexicon",
            Source::Compound => "VADER",
        }
    }

    /// Position in the stable A, B, C ordering.
    pub fn index(self) -> usize {
        match self {
            Source::Binary => 0,
            Source::Polarity => 1,
            Source::Compound => 2,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Source::Binary => "A",
            Source::Polarity => "B",
            Source::Compound => "C",
        }
    }
}

/// Canonical sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Upper-case banner used by the result headline.
    pub fn banner(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

/// Label and score of a single binary classifier call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkVote {
    pub label: Option<String>,
    pub score: f64,
}

/// Source A output after chunk voting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryScore {
    /// Modal raw label (`POSITIVE` / `NEGATIVE`), absent if the model gave none.
    pub label: Option<String>,
    /// Confidence in `[0, 1]` attached to `label`.
    pub score: f64,
    /// Per-chunk votes that produced `label` and `score`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<ChunkVote>,
}

/// Source B output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScore {
    /// `[-1, 1]`, positive = favorable.
    pub polarity: f64,
    /// `[0, 1]`, 1 = fully opinion-based.
    pub subjectivity: f64,
}

/// Source C output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundScore {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

/// Raw output of one external classifier.
///
/// A closed set: the normalization and trait rules are written against exactly
/// these three shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ClassifierOutput {
    Binary(BinaryScore),
    Polarity(PolarityScore),
    Compound(CompoundScore),
}

impl ClassifierOutput {
    pub fn source(&self) -> Source {
        match self {
            ClassifierOutput::Binary(_) => Source::Binary,
            ClassifierOutput::Polarity(_) => Source::Polarity,
            ClassifierOutput::Compound(_) => Source::Compound,
        }
    }

    /// The headline scalar for charts: signed confidence for A, polarity for B,
    /// compound for C. Always in `[-1, 1]`.
    pub fn signed_score(&self) -> f64 {
        match self {
            ClassifierOutput::Binary(b) => match b.label.as_deref() {
                Some("POSITIVE") => b.score,
                _ => -b.score,
            },
            ClassifierOutput::Polarity(p) => p.polarity,
            ClassifierOutput::Compound(c) => c.compound,
        }
    }
}

/// All three raw outputs of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScores {
    pub binary: BinaryScore,
    pub polarity: PolarityScore,
    pub compound: CompoundScore,
}

impl RawScores {
    /// Outputs in A, B, C order.
    pub fn outputs(&self) -> [ClassifierOutput; 3] {
        [
            ClassifierOutput::Binary(self.binary.clone()),
            ClassifierOutput::Polarity(self.polarity),
            ClassifierOutput::Compound(self.compound),
        ]
    }
}

/// One classifier's verdict mapped onto the canonical labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSentiment {
    pub source: Source,
    pub label: SentimentLabel,
}

/// Majority vote over the three normalized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedResult {
    pub final_label: SentimentLabel,
    /// Number of sources that voted for the plurality label (1..=3).
    pub agreement_count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectivityLabel {
    Subjective,
    Objective,
}

/// Magnitude tier of the compound score.
///
/// `Intensity` and `Strength` are two names for this same partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl From<Tier> for Intensity {
    fn from(value: Tier) -> Self {
        match value {
            Tier::Low => Intensity::Low,
            Tier::Mid => Intensity::Medium,
            Tier::High => Intensity::High,
        }
    }
}

impl From<Tier> for Strength {
    fn from(value: Tier) -> Self {
        match value {
            Tier::Low => Strength::Weak,
            Tier::Mid => Strength::Moderate,
            Tier::High => Strength::Strong,
        }
    }
}

impl Intensity {
    pub fn tier(self) -> Tier {
        match self {
            Intensity::Low => Tier::Low,
            Intensity::Medium => Tier::Mid,
            Intensity::High => Tier::High,
        }
    }
}

impl Strength {
    pub fn tier(self) -> Tier {
        match self {
            Strength::Weak => Tier::Low,
            Strength::Moderate => Tier::Mid,
            Strength::Strong => Tier::High,
        }
    }
}

/// Secondary descriptive traits derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitBundle {
    pub emotion: Emotion,
    pub subjectivity_label: SubjectivityLabel,
    pub intensity: Intensity,
    pub strength: Strength,
    /// `floor(agreement / 3 * 100)`: one of 33, 66, 100.
    pub confidence_percent: u8,
}

/// The assembled result of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub consolidated: ConsolidatedResult,
    pub traits: TraitBundle,
    /// Always ordered A, B, C.
    pub per_model: [NormalizedSentiment; 3],
}

/// Classifier and pipeline settings for a run.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub hub_endpoint: String,
    pub hub_token: Option<String>,
    pub timeout_secs: u64,
    pub chunk_chars: usize,
    /// Optional lexicon file replacing the embedded polarity lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// Invoke the three classifiers concurrently.
    pub parallel: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            hub_endpoint: DEFAULT_HUB_ENDPOINT.to_string(),
            hub_token: None,
            timeout_secs: 30,
            chunk_chars: DEFAULT_CHUNK_CHARS,
            lexicon_path: None,
            parallel: true,
        }
    }
}

/// Where the analyzed text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum TextOrigin {
    Typed,
    Document(PathBuf),
}

/// Shape of the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSummary {
    pub chars: usize,
    pub words: usize,
    pub chunks: usize,
    pub origin: TextOrigin,
}

/// A saved analysis (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub input: InputSummary,
    pub report: AnalysisReport,
    pub raw: RawScores,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_as_contract_names() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"Positive\"");
        let json = serde_json::to_string(&Emotion::Sadness).unwrap();
        assert_eq!(json, "\"Sadness\"");
    }

    #[test]
    fn signed_score_flips_negative_binary() {
        let out = ClassifierOutput::Binary(BinaryScore {
            label: Some("NEGATIVE".to_string()),
            score: 0.9,
            chunks: Vec::new(),
        });
        assert!((out.signed_score() + 0.9).abs() < 1e-12);
    }

    #[test]
    fn tier_names_line_up() {
        for tier in [Tier::Low, Tier::Mid, Tier::High] {
            assert_eq!(Intensity::from(tier).tier(), Strength::from(tier).tier());
        }
    }
}
