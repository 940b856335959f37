//! Interactive document picker.
//!
//! Kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "choose a document to upload" UX for `--pick`
//!
//! The picker searches for `.txt`, `.pdf` and `.docx` files under the current
//! working directory.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::DocumentKind;

/// Default directory recursion depth for finding documents.
const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Prompt the user to select a document from the current directory tree.
///
/// Behavior:
/// - list discovered documents
/// - accept either a number (from the list) or an explicit path
/// - `q` cancels
pub fn prompt_for_document() -> Result<PathBuf, AppError> {
    let files = discover_documents(Path::new("."));
    if files.is_empty() {
        return Err(AppError::validation(
            "No .txt/.pdf/.docx files found. Provide one with `senti analyze -f <file>`.",
        ));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    pick_from(&files, &mut input, &mut stdout)
}

/// Drive the selection loop over arbitrary reader/writer (testable).
fn pick_from<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, out: &mut W) -> Result<PathBuf, AppError> {
    let write_err = |e: io::Error| AppError::io(format!("Failed to write prompt: {e}"));

    writeln!(out, "Found {} document(s):", files.len()).map_err(write_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(out, "{:>3}) {}", idx + 1, pretty_path(path)).map_err(write_err)?;
    }

    loop {
        write!(out, "Select a document by number (1-{}) or type a path (q to quit): ", files.len())
            .map_err(write_err)?;
        out.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::validation(
                "No input received. Provide a document with `senti analyze -f <file>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::validation("Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_document_path(&files[choice - 1]);
            }
            writeln!(out, "Invalid choice: {choice}. Enter a number between 1 and {}.", files.len())
                .map_err(write_err)?;
            continue;
        }

        match validate_document_path(Path::new(line)) {
            Ok(path) => return Ok(path),
            Err(err) => {
                writeln!(out, "{err}").map_err(write_err)?;
            }
        }
    }
}

/// Validate the provided path points to an existing regular file.
///
/// Any extension is accepted; unknown ones are sniffed at extraction time.
pub fn validate_document_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::validation(format!("Document not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::validation(format!(
            "Expected a file, got a directory: {}",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// Discover supported documents under `root` (deterministic order).
pub fn discover_documents(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_documents_inner(root, 0, DEFAULT_SEARCH_DEPTH, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_documents_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_documents_inner(&path, depth + 1, max_depth, out);
            }
            continue;
        }

        if file_type.is_file() && DocumentKind::from_extension(&path).is_some() {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules" | "debug")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
