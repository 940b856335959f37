//! Command-line parsing for the multi-sentiment analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the classifier and engine code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_CHUNK_CHARS, DEFAULT_HUB_ENDPOINT, DEFAULT_SAMPLE_TEXT};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "senti", version, about = "Consolidated sentiment analysis across three classifiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze text or a document and print the consolidated verdict.
    Analyze(AnalyzeArgs),
    /// Print the text extracted from a TXT, PDF or DOCX document.
    Extract(ExtractArgs),
    /// Print a previously exported report JSON.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `senti analyze`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Classifier options shared by every command that runs an analysis.
#[derive(Debug, Args, Clone)]
pub struct ClassifierArgs {
    /// Inference endpoint of the binary sentiment model.
    #[arg(long, env = "SENTI_HUB_ENDPOINT", default_value = DEFAULT_HUB_ENDPOINT)]
    pub hub_endpoint: String,

    /// Access token for the inference endpoint.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hub_token: Option<String>,

    /// Request timeout (seconds) for the binary classifier.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum characters per binary-classifier call; longer text is chunked.
    #[arg(long, default_value_t = DEFAULT_CHUNK_CHARS)]
    pub chunk_chars: usize,

    /// Polarity lexicon (TSV) replacing the embedded one.
    #[arg(long, env = "SENTI_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Call the three classifiers one after another instead of concurrently.
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze (ignored when a document is given).
    pub text: Option<String>,

    /// Document to analyze (.txt, .pdf, .docx).
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "pick")]
    pub file: Option<PathBuf>,

    /// Choose a document interactively from the working directory.
    #[arg(long)]
    pub pick: bool,

    /// Print the report as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Render ASCII score gauges after the summary.
    #[arg(long)]
    pub plot: bool,

    /// Gauge width (columns).
    #[arg(long, default_value_t = 41)]
    pub width: usize,

    /// Export the report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Write a markdown debug bundle into this directory.
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = crate::debug::DEFAULT_DEBUG_DIR)]
    pub debug_bundle: Option<PathBuf>,

    #[command(flatten)]
    pub classifiers: ClassifierArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Document to extract (.txt, .pdf, .docx).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Report JSON produced by `senti analyze --export`.
    #[arg(value_name = "JSON")]
    pub report: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Initial text in the input area.
    #[arg(short = 't', long, default_value = DEFAULT_SAMPLE_TEXT)]
    pub text: String,

    /// Load this document into the input area on startup.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Append logs to this file (the terminal is owned by the UI).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub classifiers: ClassifierArgs,
}
