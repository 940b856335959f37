//! Input/output helpers.
//!
//! - document text extraction (`extract`)
//! - report JSON read/write (`export`)

pub mod export;
pub mod extract;

pub use export::*;
pub use extract::*;
