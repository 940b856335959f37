//! `senti-consensus` library crate.
//!
//! The binary (`senti`) is a thin wrapper around this library so that:
//!
//! - the consolidation engine is testable without spawning processes
//! - classifier handles can be injected (real adapters or test fakes)
//! - CLI and TUI share one analysis pipeline

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
