//! Ratatui-based terminal UI.
//!
//! The TUI provides a text area for typing (or loading) the input, runs the
//! shared analysis pipeline on demand, and renders the consolidated verdict,
//! the trait bundle, the per-model breakdown and a score chart.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};

use crate::app::pipeline::{analyze_text, AnalysisRun};
use crate::cli::TuiArgs;
use crate::domain::{AnalyzeConfig, SentimentLabel, Source, TextOrigin};
use crate::error::AppError;
use crate::models::Classifiers;

mod plotters_chart;

use plotters_chart::ScorePlottersChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let config = crate::app::analyze_config_from_args(&args.classifiers);
    let mut app = App::new(args.text, config);
    if let Some(path) = &args.file {
        app.load_document(path);
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::io(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Open,
    Export,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::Open => "Open document (.txt/.pdf/.docx)",
            PromptKind::Export => "Export report JSON to",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    EditingText,
    Prompt { kind: PromptKind, buffer: String },
}

struct App {
    config: AnalyzeConfig,
    input: String,
    origin: TextOrigin,
    mode: Mode,
    scroll: u16,
    status: String,
    /// Built on the first analysis and reused afterwards.
    classifiers: Option<Classifiers>,
    run: Option<AnalysisRun>,
    /// The exact text behind `run`, for debug bundles.
    analyzed_text: String,
}

impl App {
    fn new(text: String, config: AnalyzeConfig) -> Self {
        Self {
            config,
            input: text,
            origin: TextOrigin::Typed,
            mode: Mode::Normal,
            scroll: 0,
            status: "Press e to edit the text, a to analyze.".to_string(),
            classifiers: None,
            run: None,
            analyzed_text: String::new(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).map_err(|e| AppError::io(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            Mode::EditingText => {
                self.handle_text_edit(code);
                return false;
            }
            Mode::Prompt { .. } => {
                self.handle_prompt(code);
                return false;
            }
            Mode::Normal => {}
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('e') | KeyCode::Char('i') => {
                self.mode = Mode::EditingText;
                self.status = "Editing text. Esc to finish.".to_string();
            }
            KeyCode::Char('a') | KeyCode::Enter => self.analyze(),
            KeyCode::Char('o') => self.open_prompt(PromptKind::Open),
            KeyCode::Char('x') => {
                if self.run.is_some() {
                    self.open_prompt(PromptKind::Export);
                } else {
                    self.status = "Nothing to export yet; press a to analyze.".to_string();
                }
            }
            KeyCode::Char('d') => self.write_debug_bundle(),
            KeyCode::Char('c') => {
                self.input.clear();
                self.origin = TextOrigin::Typed;
                self.scroll = 0;
                self.status = "Cleared input.".to_string();
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
        false
    }

    fn handle_text_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status = format!("{} chars. Press a to analyze.", self.input.chars().count());
            }
            KeyCode::Enter => self.edit_input(|s| s.push('\n')),
            KeyCode::Backspace => self.edit_input(|s| {
                s.pop();
            }),
            KeyCode::Tab => self.edit_input(|s| s.push('\t')),
            KeyCode::Char(c) => self.edit_input(|s| s.push(c)),
            _ => {}
        }
    }

    fn edit_input(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.input);
        // Once edited, the text no longer matches the loaded document.
        self.origin = TextOrigin::Typed;
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let buffer = match kind {
            PromptKind::Open => String::new(),
            PromptKind::Export => "report.json".to_string(),
        };
        self.mode = Mode::Prompt { kind, buffer };
        self.status = "Enter to confirm, Esc to cancel.".to_string();
    }

    fn handle_prompt(&mut self, code: KeyCode) {
        let Mode::Prompt { kind, buffer } = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status = "Canceled.".to_string();
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Enter => {
                let kind = *kind;
                let path = PathBuf::from(buffer.trim());
                self.mode = Mode::Normal;
                match kind {
                    PromptKind::Open => self.load_document(&path),
                    PromptKind::Export => self.export_report(&path),
                }
            }
            _ => {}
        }
    }

    fn load_document(&mut self, path: &Path) {
        let loaded = crate::cli::picker::validate_document_path(path).and_then(|p| crate::io::extract_file(&p));
        match loaded {
            Ok(extracted) => {
                self.status = format!(
                    "Loaded {} ({}, {} chars).",
                    path.display(),
                    extracted.kind.display_name(),
                    extracted.text.chars().count()
                );
                self.input = extracted.text;
                self.origin = TextOrigin::Document(path.to_path_buf());
                self.scroll = 0;
            }
            Err(err) => self.status = format!("Open failed: {err}"),
        }
    }

    fn analyze(&mut self) {
        if let Err(err) = crate::app::pipeline::validate_text(&self.input) {
            self.status = err.to_string();
            return;
        }

        if self.classifiers.is_none() {
            match Classifiers::from_config(&self.config) {
                Ok(classifiers) => self.classifiers = Some(classifiers),
                Err(err) => {
                    self.status = format!("Classifier setup failed: {err}");
                    return;
                }
            }
        }
        let Some(classifiers) = &self.classifiers else {
            return;
        };

        match analyze_text(classifiers, &self.config, &self.input, self.origin.clone()) {
            Ok(run) => {
                self.status = format!(
                    "{} ({}/3 agree)",
                    crate::report::format_verdict(run.report.consolidated.final_label),
                    run.report.consolidated.agreement_count
                );
                self.analyzed_text = self.input.clone();
                self.run = Some(run);
            }
            Err(err) => {
                tracing::warn!(error = %err, "analysis failed");
                self.status = format!("Analysis failed: {err}");
            }
        }
    }

    fn export_report(&mut self, path: &Path) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        self.status = match crate::io::write_report_json(path, run) {
            Ok(()) => format!("Exported report: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn write_debug_bundle(&mut self) {
        let Some(run) = &self.run else {
            self.status = "No analysis to debug yet.".to_string();
            return;
        };
        let dir = Path::new(crate::debug::DEFAULT_DEBUG_DIR);
        self.status = match crate::debug::write_debug_bundle(run, &self.analyzed_text, dir) {
            Ok(path) => format!("Wrote debug bundle: {}", path.display()),
            Err(err) => format!("Debug write failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Mode::Prompt { kind, buffer } = &self.mode {
            draw_prompt(frame, size, *kind, buffer);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let origin = match &self.origin {
            TextOrigin::Typed => "typed text".to_string(),
            TextOrigin::Document(path) => path.display().to_string(),
        };
        let line = Line::from(vec![
            Span::styled("senti", Style::default().fg(Color::Cyan)),
            Span::raw(" - multi-sentiment analyzer | "),
            Span::styled(
                format!("input: {origin} | {} chars", self.input.chars().count()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.draw_input(frame, top[0]);
        self.draw_results(frame, top[1]);
        self.draw_chart(frame, rows[1]);
    }

    fn draw_input(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let editing = self.mode == Mode::EditingText;
        let border = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut text = Text::from(self.input.as_str());
        if editing {
            text.push_span(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .title("Enter text to analyze")
                    .borders(Borders::ALL)
                    .border_style(border),
            );
        frame.render_widget(p, area);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Analysis").borders(Borders::ALL);
        let Some(run) = &self.run else {
            let msg = Paragraph::new("No analysis yet. Press a to analyze.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let report = &run.report;
        let verdict_color = label_color(report.consolidated.final_label);
        let t = &report.traits;
        let gray = Style::default().fg(Color::Gray);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Final Sentiment: {}", crate::report::format_verdict(report.consolidated.final_label)),
                Style::default().fg(verdict_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Emotion: {:<10} Confidence: {}%",
                format!("{:?}", t.emotion),
                t.confidence_percent
            )),
            Line::from(format!(
                "Subjectivity: {:<10} Strength: {:?}",
                format!("{:?}", t.subjectivity_label),
                t.strength
            )),
            Line::from(format!("Intensity: {:?}", t.intensity)),
            Line::from(""),
            Line::from(Span::styled("Per-model breakdown", gray)),
        ];

        let outputs = run.raw.outputs();
        for (normalized, output) in report.per_model.iter().zip(outputs.iter()) {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<22}", crate::report::source_heading(normalized.source))),
                Span::styled(
                    format!("{:<9}", normalized.label.to_string()),
                    Style::default().fg(label_color(normalized.label)),
                ),
                Span::styled(crate::report::format_raw(output), gray),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Agreement: {}/3 models | {}", report.consolidated.agreement_count, crate::report::format_input(&run.input)),
            gray,
        )));

        let p = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Signed scores").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for an analysis...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let bars = chart_bars(run);
        let widget = ScorePlottersChart {
            bars: &bars,
            y_label: "signed score",
        };
        frame.render_widget(widget, rows[0]);

        // Legend under the bars, left to right.
        let mut spans = Vec::new();
        for bar in &bars {
            spans.push(Span::styled(
                format!("  {} {:+.3}", crate::report::source_heading(bar.source), bar.score),
                Style::default().fg(label_color(bar.label)),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.mode {
            Mode::EditingText => "type to edit  Enter newline  Esc done",
            Mode::Prompt { .. } => "Enter confirm  Esc cancel",
            Mode::Normal => "e edit  a analyze  o open  x export  d debug  c clear  ↑/↓ scroll  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// One bar of the score chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreBar {
    pub source: Source,
    pub label: SentimentLabel,
    /// Signed score clamped to `[-1, 1]`.
    pub score: f64,
}

fn chart_bars(run: &AnalysisRun) -> [ScoreBar; 3] {
    let outputs = run.raw.outputs();
    let labels = run.report.per_model;
    std::array::from_fn(|i| ScoreBar {
        source: labels[i].source,
        label: labels[i].label,
        score: outputs[i].signed_score().clamp(-1.0, 1.0),
    })
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Blue,
    }
}

fn draw_prompt(frame: &mut ratatui::Frame<'_>, area: Rect, kind: PromptKind, buffer: &str) {
    let width = area.width.saturating_sub(8).min(70);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);
    let p = Paragraph::new(format!("{buffer}_")).block(
        Block::default()
            .title(kind.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChunkVote, CompoundScore, PolarityScore};
    use crate::models::{BinaryClassifier, CompoundAnalyzer, PolarityAnalyzer};

    struct Negative;

    impl BinaryClassifier for Negative {
        fn classify_chunk(&self, _chunk: &str) -> Result<ChunkVote, AppError> {
            Ok(ChunkVote {
                label: Some("NEGATIVE".to_string()),
                score: 0.97,
            })
        }

        fn max_chars(&self) -> usize {
            512
        }
    }

    impl PolarityAnalyzer for Negative {
        fn analyze(&self, _text: &str) -> Result<PolarityScore, AppError> {
            Ok(PolarityScore {
                polarity: -0.5,
                subjectivity: 0.8,
            })
        }
    }

    impl CompoundAnalyzer for Negative {
        fn analyze(&self, _text: &str) -> Result<CompoundScore, AppError> {
            Ok(CompoundScore {
                compound: -0.7,
                pos: 0.0,
                neu: 0.3,
                neg: 0.7,
            })
        }
    }

    fn app(text: &str) -> App {
        let mut app = App::new(text.to_string(), AnalyzeConfig::default());
        app.classifiers = Some(Classifiers::new(Box::new(Negative), Box::new(Negative), Box::new(Negative)));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn editing_mode_captures_q_until_escape() {
        let mut app = app("");
        assert!(!app.handle_key(KeyCode::Char('e')));
        type_text(&mut app, "quite bad");
        assert_eq!(app.input, "quite bad");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.input, "quite ba");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn analyze_stores_run_and_reports_verdict() {
        let mut app = app("terrible service");
        app.handle_key(KeyCode::Char('a'));
        let run = app.run.as_ref().unwrap();
        assert_eq!(run.report.consolidated.final_label, SentimentLabel::Negative);
        assert_eq!(app.status, "NEGATIVE :( (3/3 agree)");
        assert_eq!(app.analyzed_text, "terrible service");

        let bars = chart_bars(run);
        assert_eq!(bars.map(|b| b.source), Source::ALL);
        assert!(bars.iter().all(|b| b.score < 0.0 && b.score >= -1.0));
    }

    #[test]
    fn blank_input_shows_validation_message() {
        let mut app = app("   ");
        app.handle_key(KeyCode::Char('a'));
        assert!(app.run.is_none());
        assert_eq!(app.status, "Please provide some text.");
    }

    #[test]
    fn missing_token_is_a_status_not_a_crash() {
        let mut app = App::new("fine".to_string(), AnalyzeConfig::default());
        app.handle_key(KeyCode::Char('a'));
        assert!(app.run.is_none());
        assert!(app.status.starts_with("Classifier setup failed"));
    }

    #[test]
    fn open_prompt_loads_document_and_marks_origin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.txt");
        std::fs::write(&path, "the soup was cold").unwrap();

        let mut app = app("");
        app.handle_key(KeyCode::Char('o'));
        type_text(&mut app, &path.display().to_string());
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.input, "the soup was cold");
        assert_eq!(app.origin, TextOrigin::Document(path.clone()));

        // Editing afterwards turns the text back into typed input.
        app.handle_key(KeyCode::Char('e'));
        type_text(&mut app, "!");
        assert_eq!(app.origin, TextOrigin::Typed);
    }

    #[test]
    fn open_failure_keeps_previous_text() {
        let mut app = app("keep me");
        app.handle_key(KeyCode::Char('o'));
        type_text(&mut app, "/definitely/not/here.txt");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input, "keep me");
        assert!(app.status.starts_with("Open failed"));
    }

    #[test]
    fn export_requires_a_run_then_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");

        let mut app = app("awful");
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.mode, Mode::Normal);

        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('x'));
        // Replace the suggested file name.
        for _ in 0.."report.json".len() {
            app.handle_key(KeyCode::Backspace);
        }
        type_text(&mut app, &out.display().to_string());
        app.handle_key(KeyCode::Enter);

        assert!(app.status.starts_with("Exported report"), "{}", app.status);
        let saved = crate::io::read_report_json(&out).unwrap();
        assert_eq!(saved.report, app.run.as_ref().unwrap().report);
    }
}
