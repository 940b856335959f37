//! Plurality vote over the three normalized labels.
//!
//! Rules:
//! 1. Count occurrences per label.
//! 2. The highest count wins; among equal counts the label whose first
//!    occurrence came earliest wins.
//! 3. If no two sources agree (`agreement_count == 1`), the final label is
//!    Neutral. At least 2-of-3 agreement is required for a polar verdict.

use crate::domain::{ConsolidatedResult, NormalizedSentiment, SentimentLabel};

/// Consolidate exactly three normalized sentiments.
pub fn consolidate(sentiments: &[NormalizedSentiment; 3]) -> ConsolidatedResult {
    let mut counts: Vec<(SentimentLabel, u8)> = Vec::with_capacity(3);
    for s in sentiments {
        match counts.iter_mut().find(|(label, _)| *label == s.label) {
            Some(entry) => entry.1 += 1,
            None => counts.push((s.label, 1)),
        }
    }

    // `counts` is in first-seen order, so a strict `>` keeps the earliest on ties.
    let mut best = counts[0];
    for &entry in &counts[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }

    let (mut final_label, agreement_count) = best;
    if agreement_count == 1 {
        final_label = SentimentLabel::Neutral;
    }

    ConsolidatedResult {
        final_label,
        agreement_count,
    }
}
