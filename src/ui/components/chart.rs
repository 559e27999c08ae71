use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

/// Line chart of an hourly series with a horizontal reference line.
pub struct ThresholdChart<'a> {
    title: &'a str,
    points: Vec<(f64, f64)>,
    series_label: &'a str,
    series_color: Color,
    threshold: f64,
    threshold_label: &'a str,
    threshold_color: Color,
    y_bounds: [f64; 2],
    unit: &'a str,
    x_labels: Vec<String>,
}

impl<'a> ThresholdChart<'a> {
    pub fn new(title: &'a str, points: Vec<(f64, f64)>) -> Self {
        Self {
            title,
            points,
            series_label: "",
            series_color: Theme::FG,
            threshold: 0.0,
            threshold_label: "",
            threshold_color: Theme::THRESHOLD_LINE,
            y_bounds: [0.0, 100.0],
            unit: "",
            x_labels: Vec::new(),
        }
    }

    pub fn series(mut self, label: &'a str, color: Color) -> Self {
        self.series_label = label;
        self.series_color = color;
        self
    }

    pub fn threshold(mut self, label: &'a str, value: f64, color: Color) -> Self {
        self.threshold_label = label;
        self.threshold = value;
        self.threshold_color = color;
        self
    }

    pub fn y_axis(mut self, min: f64, max: f64, unit: &'a str) -> Self {
        self.y_bounds = [min, max];
        self.unit = unit;
        self
    }

    pub fn x_labels(mut self, labels: Vec<String>) -> Self {
        self.x_labels = labels;
        self
    }

    fn x_bounds(&self) -> [f64; 2] {
        let first = self.points.first().map(|p| p.0).unwrap_or(0.0);
        let last = self.points.last().map(|p| p.0).unwrap_or(0.0);
        if first < last {
            [first, last]
        } else {
            [last - 1.0, last]
        }
    }
}

impl Widget for ThresholdChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title, Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.points.is_empty() {
            Paragraph::new(Span::styled("No history available", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let [x_min, x_max] = self.x_bounds();
        let threshold_line = [(x_min, self.threshold), (x_max, self.threshold)];

        let datasets = vec![
            Dataset::default()
                .name(self.series_label)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.series_color))
                .data(&self.points),
            Dataset::default()
                .name(format!("{} ({}{})", self.threshold_label, self.threshold, self.unit))
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.threshold_color))
                .data(&threshold_line),
        ];

        let [y_min, y_max] = self.y_bounds;
        let y_labels = vec![
            format!("{:.0}{}", y_min, self.unit),
            format!("{:.0}{}", (y_min + y_max) / 2.0, self.unit),
            format!("{:.0}{}", y_max, self.unit),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopRight))
            .x_axis(
                Axis::default()
                    .title("Hour")
                    .style(Theme::dim())
                    .bounds([x_min, x_max])
                    .labels(self.x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds(self.y_bounds)
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
