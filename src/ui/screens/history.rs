use crate::logic::calculations::{
    hours_at_or_above_temp, hours_below_moisture_threshold, moisture_stats, temperature_stats,
    SeriesStats,
};
use crate::logic::simulator::{HISTORY_MOISTURE_BOUNDS, HISTORY_TEMP_BOUNDS};
use crate::models::{HistoricalSeries, ThresholdConfig};
use crate::ui::components::ThresholdChart;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HistoryScreen<'a> {
    pub plot: &'a str,
    pub history: &'a HistoricalSeries,
    pub thresholds: &'a ThresholdConfig,
}

impl<'a> HistoryScreen<'a> {
    pub fn new(plot: &'a str, history: &'a HistoricalSeries, thresholds: &'a ThresholdConfig) -> Self {
        Self {
            plot,
            history,
            thresholds,
        }
    }

    /// First, middle and last timestamps as HH:MM.
    fn x_labels(&self) -> Vec<String> {
        if self.history.is_empty() {
            return Vec::new();
        }
        let mid = self.history.points[self.history.len() / 2].timestamp;
        [
            self.history.first_timestamp(),
            Some(mid),
            self.history.last_timestamp(),
        ]
        .into_iter()
        .flatten()
        .map(|t| t.format("%H:%M").to_string())
        .collect()
    }
}

impl Widget for HistoryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Title
                Constraint::Percentage(40), // Moisture chart
                Constraint::Percentage(40), // Temperature chart
                Constraint::Min(4),         // Summary
                Constraint::Length(1),      // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Sensor History", Theme::title()),
            Span::styled(
                format!(" - {} (last {} hours)", self.plot, self.history.len()),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let t = self.thresholds;
        let x_labels = self.x_labels();

        ThresholdChart::new("Soil Moisture", self.history.moisture_points())
            .series("Moisture", Theme::MOISTURE_LINE)
            .threshold(
                "Irrigation threshold",
                f64::from(t.moisture_threshold),
                Theme::THRESHOLD_LINE,
            )
            .y_axis(0.0, HISTORY_MOISTURE_BOUNDS.1 + 10.0, "%")
            .x_labels(x_labels.clone())
            .render(chunks[1], buf);

        ThresholdChart::new("Ambient Temperature", self.history.temperature_points())
            .series("Temperature", Theme::TEMP_LINE)
            .threshold("Alert", f64::from(t.max_tolerable_temp), Theme::ERROR)
            .y_axis(HISTORY_TEMP_BOUNDS.0 - 5.0, 55.0, "°C")
            .x_labels(x_labels)
            .render(chunks[2], buf);

        self.render_summary(chunks[3], buf);

        let nav = Line::from(vec![
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[p/P]", Theme::nav_key()),
            Span::styled("Plot ", Theme::nav_label()),
            Span::styled("[1/2/s]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl HistoryScreen<'_> {
    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let t = self.thresholds;
        let mut lines = Vec::new();

        if let Some(stats) = moisture_stats(self.history) {
            let dry_hours = hours_below_moisture_threshold(self.history, t.moisture_threshold);
            lines.push(stats_line(
                "Moisture",
                &stats,
                "%",
                Theme::moisture_color(stats.avg, t.moisture_threshold),
                format!("{} h below threshold", dry_hours),
            ));
        }

        if let Some(stats) = temperature_stats(self.history) {
            let hot_hours = hours_at_or_above_temp(self.history, t.max_tolerable_temp);
            lines.push(stats_line(
                "Temperature",
                &stats,
                "°C",
                Theme::temp_color(stats.max, t.max_tolerable_temp),
                format!("{} h at or above alert", hot_hours),
            ));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled("No data available", Theme::dim())));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

fn stats_line(
    label: &str,
    stats: &SeriesStats,
    unit: &str,
    color: ratatui::style::Color,
    extra: String,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Theme::dim()),
        Span::styled(
            format!(
                "avg {:.1}{u}  min {:.1}{u}  max {:.1}{u}",
                stats.avg,
                stats.min,
                stats.max,
                u = unit
            ),
            Style::default().fg(color),
        ),
        Span::styled(format!("  ({})", extra), Theme::dim()),
    ])
}
