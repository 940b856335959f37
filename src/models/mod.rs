//! Classifier adapters and the shared classifier context.
//!
//! Each external model sits behind a small trait so the pipeline can be driven
//! by fakes in tests. The concrete adapters are:
//!
//! - `hub`: Source A, binary transformer classifier over HTTP
//! - `lexicon`: Source B, pattern-lexicon polarity / subjectivity
//! - `vader`: Source C, VADER compound score

use crate::domain::{AnalyzeConfig, BinaryScore, ChunkVote, CompoundScore, PolarityScore, RawScores};
use crate::engine::vote_chunks;
use crate::error::AppError;

pub mod hub;
pub mod lexicon;
pub mod vader;

pub use hub::HubClassifier;
pub use lexicon::LexiconAnalyzer;
pub use vader::VaderAnalyzer;

/// Source A: POSITIVE/NEGATIVE classifier with a bounded input length.
pub trait BinaryClassifier: Send + Sync {
    /// Classify one chunk of at most `max_chars()` characters.
    fn classify_chunk(&self, chunk: &str) -> Result<ChunkVote, AppError>;

    fn max_chars(&self) -> usize;
}

/// Source B: polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
pub trait PolarityAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<PolarityScore, AppError>;
}

/// Source C: lexicon-based compound score.
pub trait CompoundAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<CompoundScore, AppError>;
}

/// Loaded classifier handles.
///
/// Built once before the first request and only borrowed afterwards.
pub struct Classifiers {
    binary: Box<dyn BinaryClassifier>,
    polarity: Box<dyn PolarityAnalyzer>,
    compound: Box<dyn CompoundAnalyzer>,
}

impl Classifiers {
    pub fn new(
        binary: Box<dyn BinaryClassifier>,
        polarity: Box<dyn PolarityAnalyzer>,
        compound: Box<dyn CompoundAnalyzer>,
    ) -> Self {
        Self {
            binary,
            polarity,
            compound,
        }
    }

    /// Construct the production adapters from run configuration.
    pub fn from_config(config: &AnalyzeConfig) -> Result<Self, AppError> {
        let binary = HubClassifier::from_config(config)?;
        let polarity = match &config.lexicon_path {
            Some(path) => LexiconAnalyzer::from_path(path)?,
            None => LexiconAnalyzer::embedded()?,
        };
        let compound = VaderAnalyzer::new();
        tracing::info!(
            endpoint = %config.hub_endpoint,
            chunk_chars = config.chunk_chars,
            lexicon_entries = polarity.len(),
            "classifiers ready"
        );
        Ok(Self::new(Box::new(binary), Box::new(polarity), Box::new(compound)))
    }

    /// Number of chunks the binary classifier will see for `text`.
    pub fn chunk_count(&self, text: &str) -> usize {
        chunk_text(text, self.binary.max_chars()).len()
    }

    /// Invoke all three classifiers on `text`.
    ///
    /// The calls are independent; `parallel` only changes scheduling. The first
    /// failure (in A, B, C order) aborts the whole request.
    pub fn score(&self, text: &str, parallel: bool) -> Result<RawScores, AppError> {
        let (binary, (polarity, compound)) = if parallel {
            rayon::join(
                || self.score_binary(text),
                || rayon::join(|| self.polarity.analyze(text), || self.compound.analyze(text)),
            )
        } else {
            (
                self.score_binary(text),
                (self.polarity.analyze(text), self.compound.analyze(text)),
            )
        };

        Ok(RawScores {
            binary: binary?,
            polarity: polarity?,
            compound: compound?,
        })
    }

    fn score_binary(&self, text: &str) -> Result<BinaryScore, AppError> {
        let chunks = chunk_text(text, self.binary.max_chars());
        let mut votes = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            let vote = self.binary.classify_chunk(chunk)?;
            tracing::debug!(chunk = idx, label = ?vote.label, score = vote.score, "binary chunk");
            votes.push(vote);
        }
        Ok(vote_chunks(votes))
    }
}

/// Split `text` into consecutive pieces of at most `max_chars` characters.
///
/// Splits on char boundaries, never inside a code point. Empty text yields no
/// chunks.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut count = 0usize;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            out.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedBinary {
        calls: AtomicUsize,
        max: usize,
    }

    impl BinaryClassifier for FixedBinary {
        fn classify_chunk(&self, chunk: &str) -> Result<ChunkVote, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let label = if chunk.contains("bad") { "NEGATIVE" } else { "POSITIVE" };
            Ok(ChunkVote {
                label: Some(label.to_string()),
                score: 0.9,
            })
        }

        fn max_chars(&self) -> usize {
            self.max
        }
    }

    struct FixedPolarity;

    impl PolarityAnalyzer for FixedPolarity {
        fn analyze(&self, _text: &str) -> Result<PolarityScore, AppError> {
            Ok(PolarityScore {
                polarity: 0.3,
                subjectivity: 0.6,
            })
        }
    }

    struct FailingCompound;

    impl CompoundAnalyzer for FailingCompound {
        fn analyze(&self, _text: &str) -> Result<CompoundScore, AppError> {
            Err(AppError::classifier("compound analyzer offline"))
        }
    }

    #[test]
    fn chunk_text_respects_char_boundaries() {
        let text = "ééééé";
        let chunks = chunk_text(text, 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn chunk_text_short_input_is_one_chunk() {
        assert_eq!(chunk_text("hello", 512), vec!["hello"]);
        assert!(chunk_text("", 512).is_empty());
    }

    #[test]
    fn score_votes_across_chunks() {
        let binary = FixedBinary {
            calls: AtomicUsize::new(0),
            max: 4,
        };
        let classifiers = Classifiers::new(
            Box::new(binary),
            Box::new(FixedPolarity),
            Box::new(crate::models::VaderAnalyzer::new()),
        );
        // "bad " | "good" | "good" -> two POSITIVE vs one NEGATIVE.
        let raw = classifiers.score("bad goodgood", false).unwrap();
        assert_eq!(raw.binary.chunks.len(), 3);
        assert_eq!(raw.binary.label.as_deref(), Some("POSITIVE"));
        assert_eq!(classifiers.chunk_count("bad goodgood"), 3);
    }

    #[test]
    fn any_failure_aborts_request() {
        let classifiers = Classifiers::new(
            Box::new(FixedBinary {
                calls: AtomicUsize::new(0),
                max: 512,
            }),
            Box::new(FixedPolarity),
            Box::new(FailingCompound),
        );
        for parallel in [false, true] {
            let err = classifiers.score("fine text", parallel).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Classifier);
        }
    }
}
