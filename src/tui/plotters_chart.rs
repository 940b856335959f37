//! Plotters-powered score chart widget for Ratatui.
//!
//! Draws one vertical bar per source on a fixed `[-1, 1]` axis so runs are
//! visually comparable. Rendered into the Ratatui buffer through
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::ScoreBar;
use crate::domain::SentimentLabel;

/// Horizontal fraction of each slot covered by its bar.
const BAR_WIDTH: f64 = 0.5;

/// Render-only description of the chart; all data is prepared by the caller.
pub struct ScorePlottersChart<'a> {
    pub bars: &'a [ScoreBar],
    pub y_label: &'a str,
}

impl<'a> Widget for ScorePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if self.bars.is_empty() {
            return;
        }

        let slots = self.bars.len() as f64;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .build_cartesian_2d(0.0..slots, -1.0..1.0)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .disable_x_axis()
                .y_desc(self.y_label)
                .y_labels(5)
                .y_label_formatter(&|v| format!("{v:+.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Zero line separates positive from negative scores.
            chart.draw_series(LineSeries::new([(0.0, 0.0), (slots, 0.0)], &WHITE.mix(0.6)))?;

            // Bars are outlined with vertical strokes; the backend renders
            // filled shapes unevenly at terminal resolution.
            for (idx, bar) in self.bars.iter().enumerate() {
                let color = bar_color(bar.label);
                let left = idx as f64 + (1.0 - BAR_WIDTH) / 2.0;
                let strokes = 6;
                chart.draw_series((0..=strokes).map(|s| {
                    let x = left + BAR_WIDTH * s as f64 / strokes as f64;
                    PathElement::new(vec![(x, 0.0), (x, bar.score)], &color)
                }))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn bar_color(label: SentimentLabel) -> RGBColor {
    match label {
        SentimentLabel::Positive => RGBColor(0, 255, 0),
        SentimentLabel::Negative => RGBColor(255, 0, 0),
        SentimentLabel::Neutral => RGBColor(80, 140, 255),
    }
}
