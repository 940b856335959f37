//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - extracts document text
//! - builds the classifier context and runs the analysis pipeline
//! - prints reports/gauges
//! - writes optional exports and debug bundles

use clap::Parser;

use crate::cli::{AnalyzeArgs, ClassifierArgs, Command, ExtractArgs, ShowArgs};
use crate::domain::{AnalyzeConfig, TextOrigin};
use crate::error::AppError;
use crate::logging::LogTarget;
use crate::models::Classifiers;

pub mod pipeline;

/// Entry point for the `senti` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; real environment variables win.
    dotenvy::dotenv().ok();

    // We want `senti` and `senti -t "..."` to behave like `senti tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init(log_target(&cli.command))?;

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Extract(args) => handle_extract(args),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

/// CLI commands log to stderr; the TUI owns the terminal.
fn log_target(command: &Command) -> LogTarget<'_> {
    match command {
        Command::Tui(args) => match &args.log_file {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Off,
        },
        Command::Analyze(_) | Command::Extract(_) | Command::Show(_) => LogTarget::Stderr,
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analyze_config_from_args(&args.classifiers);

    // Resolve the text first so a bad document fails before any model is touched.
    let document = if args.pick {
        Some(crate::cli::picker::prompt_for_document()?)
    } else {
        args.file.clone()
    };
    let (text, origin) = match document {
        Some(path) => {
            let extracted = crate::io::extract_file(&path)?;
            tracing::info!(
                path = %path.display(),
                kind = extracted.kind.display_name(),
                chars = extracted.text.chars().count(),
                "extracted document"
            );
            (extracted.text, TextOrigin::Document(path))
        }
        None => (args.text.clone().unwrap_or_default(), TextOrigin::Typed),
    };
    pipeline::validate_text(&text)?;

    let classifiers = Classifiers::from_config(&config)?;
    let run = pipeline::analyze_text(&classifiers, &config, &text, origin)?;

    if args.json {
        println!("{}", crate::io::report_json_string(&run)?);
    } else {
        println!("{}", crate::report::format_summary(&run.report, &run.raw, &run.input));
        if args.plot {
            println!("{}", crate::plot::render_score_gauges(&run.raw, args.width));
        }
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_report_json(path, &run)?;
    }
    if let Some(dir) = &args.debug_bundle {
        let path = crate::debug::write_debug_bundle(&run, &text, dir)?;
        eprintln!("Wrote debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_extract(args: ExtractArgs) -> Result<(), AppError> {
    let extracted = crate::io::extract_file(&args.file)?;
    println!("{}", extracted.text);
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_report_json(&args.report)?;
    println!("{}", crate::report::format_report_file(&file));
    Ok(())
}

pub fn analyze_config_from_args(args: &ClassifierArgs) -> AnalyzeConfig {
    AnalyzeConfig {
        hub_endpoint: args.hub_endpoint.clone(),
        hub_token: args.hub_token.clone(),
        timeout_secs: args.timeout_secs,
        chunk_chars: args.chunk_chars,
        lexicon_path: args.lexicon.clone(),
        parallel: !args.sequential,
    }
}

/// Rewrite argv so `senti` defaults to `senti tui`.
///
/// Rules:
/// - `senti`                      -> `senti tui`
/// - `senti -t "text" ...`        -> `senti tui -t "text" ...`
/// - `senti --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "extract" | "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
