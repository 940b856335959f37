//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw classifier outputs (`Source`, `ClassifierOutput`, `RawScores`)
//! - the canonical label set (`SentimentLabel`, `NormalizedSentiment`)
//! - engine outputs (`ConsolidatedResult`, `TraitBundle`, `AnalysisReport`)
//! - run configuration (`AnalyzeConfig`)

pub mod types;

pub use types::*;
