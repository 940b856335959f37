//! Pattern-lexicon polarity / subjectivity analyzer (Source B).
//!
//! Every lexicon word found in the text is one assessment `(polarity,
//! subjectivity)`. Modifiers shape the next assessment:
//!
//! - an intensifier (entry with an intensity column) directly before another
//!   lexicon word multiplies its polarity and subjectivity
//! - a negation within the last few tokens multiplies polarity by `-0.5`
//!
//! The result is the mean over all assessments, clamped to `[-1, 1]` and
//! `[0, 1]`. Text without any lexicon word scores `(0, 0)`.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::PolarityScore;
use crate::error::AppError;
use crate::models::PolarityAnalyzer;

const EMBEDDED_LEXICON: &str = include_str!("../../data/polarity_lexicon.tsv");

/// How many tokens a negation stays active for.
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;
const SENTENCE_BREAK: &str = ".";
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ';'];
/// Shortest stem tried when stripping an inflection.
const MIN_STEM_CHARS: usize = 3;
const NEGATIONS: [&str; 6] = ["not", "never", "no", "nor", "without", "cannot"];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
}

pub struct LexiconAnalyzer {
    entries: HashMap<String, Entry>,
}

impl LexiconAnalyzer {
    /// The lexicon shipped with the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::parse(EMBEDDED_LEXICON, "embedded lexicon")
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read lexicon '{}': {e}", path.display())))?;
        Self::parse(&raw, &path.display().to_string())
    }

    /// Parse TSV lines `word<TAB>polarity<TAB>subjectivity[<TAB>intensity]`.
    pub fn parse(raw: &str, origin: &str) -> Result<Self, AppError> {
        let mut entries = HashMap::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if !(3..=4).contains(&fields.len()) {
                return Err(AppError::config(format!(
                    "{origin}:{}: expected 3 or 4 tab-separated fields, got {}.",
                    idx + 1,
                    fields.len()
                )));
            }
            let num = |s: &str, name: &str| -> Result<f64, AppError> {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| AppError::config(format!("{origin}:{}: invalid {name} '{s}'.", idx + 1)))
            };
            let polarity = num(fields[1], "polarity")?;
            let subjectivity = num(fields[2], "subjectivity")?;
            let intensity = match fields.get(3) {
                Some(v) => num(v, "intensity")?,
                None => 1.0,
            };
            if !(-1.0..=1.0).contains(&polarity) || !(0.0..=1.0).contains(&subjectivity) {
                return Err(AppError::config(format!(
                    "{origin}:{}: polarity must be in [-1, 1] and subjectivity in [0, 1].",
                    idx + 1
                )));
            }
            entries.insert(
                fields[0].to_lowercase(),
                Entry {
                    polarity,
                    subjectivity,
                    intensity,
                },
            );
        }
        if entries.is_empty() {
            return Err(AppError::config(format!("{origin}: lexicon has no entries.")));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact form first, then the word with a common inflection removed.
    fn lookup(&self, token: &str) -> Option<&Entry> {
        if let Some(entry) = self.entries.get(token) {
            return Some(entry);
        }
        base_forms(token).into_iter().find_map(|base| self.entries.get(&base))
    }

    fn score(&self, text: &str) -> PolarityScore {
        let tokens = tokenize(text);
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut since_negation: Option<usize> = None;
        let mut multiplier = 1.0_f64;

        for (idx, token) in tokens.iter().enumerate() {
            if token == SENTENCE_BREAK {
                since_negation = None;
                multiplier = 1.0;
                continue;
            }
            if is_negation(token) {
                since_negation = Some(0);
                continue;
            }

            match self.lookup(token) {
                Some(entry) => {
                    let next_is_word = tokens
                        .get(idx + 1)
                        .is_some_and(|next| self.lookup(next).is_some());
                    if entry.intensity != 1.0 && next_is_word {
                        multiplier *= entry.intensity;
                        continue;
                    }

                    let mut polarity = entry.polarity * multiplier;
                    let subjectivity = (entry.subjectivity * multiplier).clamp(0.0, 1.0);
                    if since_negation.is_some() {
                        polarity *= NEGATION_FACTOR;
                    }
                    assessments.push((polarity.clamp(-1.0, 1.0), subjectivity));
                    multiplier = 1.0;
                    since_negation = None;
                }
                None => {
                    multiplier = 1.0;
                    since_negation = match since_negation {
                        Some(n) if n + 1 < NEGATION_WINDOW => Some(n + 1),
                        _ => None,
                    };
                }
            }
        }

        if assessments.is_empty() {
            return PolarityScore {
                polarity: 0.0,
                subjectivity: 0.0,
            };
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|a| a.0).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|a| a.1).sum::<f64>() / n;
        PolarityScore {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<PolarityScore, AppError> {
        Ok(self.score(text))
    }
}

/// Lowercased word tokens; apostrophes stay inside words (`don't`).
///
/// Sentence terminators become a single `SENTENCE_BREAK` token.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' || c == '’' {
            word.push(c);
            continue;
        }
        push_word(&mut tokens, &mut word);
        if SENTENCE_TERMINATORS.contains(&c) && tokens.last().is_some_and(|t| t != SENTENCE_BREAK) {
            tokens.push(SENTENCE_BREAK.to_string());
        }
    }
    push_word(&mut tokens, &mut word);
    tokens
}

fn push_word(tokens: &mut Vec<String>, word: &mut String) {
    let trimmed = word.trim_matches(|c| c == '\'' || c == '’');
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_lowercase());
    }
    word.clear();
}

/// Candidate dictionary forms of an inflected word (`loves` -> `love`).
fn base_forms(token: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |stem: &str, tail: &str| {
        if stem.chars().count() >= MIN_STEM_CHARS {
            out.push(format!("{stem}{tail}"));
        }
    };
    if let Some(stem) = token.strip_suffix("ies") {
        push(stem, "y");
    }
    if let Some(stem) = token.strip_suffix("ily") {
        push(stem, "y");
    }
    if let Some(stem) = token.strip_suffix('s') {
        push(stem, "");
    }
    if let Some(stem) = token.strip_suffix("es") {
        push(stem, "");
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            push(stem, "");
            push(stem, "e");
        }
    }
    if let Some(stem) = token.strip_suffix("ly") {
        push(stem, "");
    }
    out
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't") || token.ends_with("n’t")
}
