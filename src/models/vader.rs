//! VADER compound-score analyzer (Source C).

use std::collections::HashMap;

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::domain::CompoundScore;
use crate::error::AppError;
use crate::models::CompoundAnalyzer;

/// Thin handle over `vader_sentiment`.
///
/// The crate keeps its lexicons in process-wide statics, so the analyzer
/// value itself is a pair of references and is created per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderAnalyzer;

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl CompoundAnalyzer for VaderAnalyzer {
    fn analyze(&self, text: &str) -> Result<CompoundScore, AppError> {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        scores_from_map(&scores)
    }
}

/// Pull the four VADER fields out of the score map.
pub fn scores_from_map(scores: &HashMap<&str, f64>) -> Result<CompoundScore, AppError> {
    let field = |name: &str| -> Result<f64, AppError> {
        scores
            .get(name)
            .copied()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AppError::contract(format!("VADER output is missing '{name}'.")))
    };
    Ok(CompoundScore {
        compound: field("compound")?,
        pos: field("pos")?,
        neu: field("neu")?,
        neg: field("neg")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn positive_text_has_positive_compound() {
        let s = VaderAnalyzer::new().analyze("I love this, it is wonderful!").unwrap();
        assert!(s.compound >= 0.05, "compound={}", s.compound);
        assert!((-1.0..=1.0).contains(&s.compound));
    }

    #[test]
    fn negative_text_has_negative_compound() {
        let s = VaderAnalyzer::new().analyze("This is terrible and I hate it.").unwrap();
        assert!(s.compound <= -0.05, "compound={}", s.compound);
    }

    #[test]
    fn missing_field_is_contract_violation() {
        let mut map = HashMap::new();
        map.insert("pos", 0.1);
        map.insert("neu", 0.8);
        map.insert("neg", 0.1);
        let err = scores_from_map(&map).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        map.insert("compound", 0.2);
        assert!((scores_from_map(&map).unwrap().compound - 0.2).abs() < 1e-12);
    }
}
