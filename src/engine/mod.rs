//! Consolidation engine.
//!
//! Responsibilities:
//!
//! - map each classifier's raw output onto Positive / Negative / Neutral
//! - vote the three labels into a final label with an agreement count
//! - derive descriptive traits from the compound score
//! - assemble everything into one `AnalysisReport`
//!
//! Everything here is pure: no I/O, no classifier handles.

pub mod assemble;
pub mod consolidate;
pub mod normalize;
pub mod traits;

pub use assemble::*;
pub use consolidate::*;
pub use normalize::*;
pub use traits::*;
