use crate::logic::FieldSnapshot;
use crate::models::{Recommendation, ThresholdConfig, TEMPERATURE_ALERT_MESSAGE};
use crate::ui::components::{battery_gauge, moisture_gauge, temperature_gauge, MetricWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub farm_name: &'a str,
    pub snapshot: &'a FieldSnapshot,
    pub thresholds: &'a ThresholdConfig,
    pub recommendations: &'a [Recommendation],
    pub plot_position: (usize, usize),
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        farm_name: &'a str,
        snapshot: &'a FieldSnapshot,
        thresholds: &'a ThresholdConfig,
        recommendations: &'a [Recommendation],
    ) -> Self {
        Self {
            farm_name,
            snapshot,
            thresholds,
            recommendations,
            plot_position: (1, 1),
            status_message: None,
        }
    }

    /// 1-based index of the selected plot and the plot count.
    pub fn with_plot_position(mut self, index: usize, count: usize) -> Self {
        self.plot_position = (index + 1, count);
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Metrics row
                Constraint::Length(5), // Recommendation
                Constraint::Min(6),    // Rule details
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_metrics(chunks[1], buf);
        self.render_recommendation(chunks[2], buf);
        self.render_details(chunks[3], buf);
        self.render_status_message(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let (index, count) = self.plot_position;
        let title = format!(
            "{} - {} ({}/{})",
            self.farm_name, self.snapshot.plot, index, count
        );

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = format!(
            "Last reading: {}",
            self.snapshot.captured_at.format("%Y-%m-%d %H:%M")
        );
        let para = Paragraph::new(Span::styled(info, Theme::dim())).block(block);
        para.render(area, buf);
    }

    fn render_metrics(&self, area: Rect, buf: &mut Buffer) {
        let metric_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let reading = &self.snapshot.reading;
        let t = self.thresholds;

        moisture_gauge(
            "Soil Moisture",
            Some(f64::from(reading.soil_moisture_percent)),
            t.moisture_threshold,
        )
        .render(metric_chunks[0], buf);

        temperature_gauge(
            "Ambient Temp",
            Some(f64::from(reading.ambient_temp_c)),
            t.max_tolerable_temp,
        )
        .render(metric_chunks[1], buf);

        battery_gauge(
            "Battery",
            Some(f64::from(reading.battery_percent)),
            t.min_battery_for_irrigation,
        )
        .render(metric_chunks[2], buf);

        MetricWidget::new("Rain Forecast", reading.rain_forecast)
            .color(reading.rain_forecast.color())
            .render(metric_chunks[3], buf);

        MetricWidget::new("Drought Tolerance", t.drought_tolerance)
            .color(Theme::HIGHLIGHT)
            .render(metric_chunks[4], buf);
    }

    fn render_recommendation(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("Recommendation for {}", self.snapshot.plot),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let decision = &self.snapshot.decision;
        let (symbol, style) = if decision.should_irrigate {
            ("✓ ", Theme::success())
        } else {
            ("… ", Theme::info())
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(symbol, style),
            Span::styled(decision.headline(), style),
            Span::raw(" "),
            Span::styled(decision.reason.to_string(), style),
        ])];

        if self.snapshot.temperature_alert {
            lines.push(Line::from(vec![
                Span::styled("⚠ ", Theme::alert()),
                Span::styled(TEMPERATURE_ALERT_MESSAGE, Theme::alert()),
            ]));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Field Rules", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            let para = Paragraph::new(Span::styled("No active rules", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .map(|r| {
                let severity_style = Style::default().fg(r.severity.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", r.severity.symbol()), severity_style),
                    Span::styled(&r.title, severity_style),
                    Span::styled(
                        format!(" [{}]", r.category),
                        Style::default().fg(r.category.color()),
                    ),
                ]);

                let data = r
                    .data_points
                    .iter()
                    .map(|d| format!("{}: {}", d.label, d.value))
                    .collect::<Vec<_>>()
                    .join(" • ");
                let data_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(data, Theme::dim()),
                ]);

                let mut lines = vec![title_line, data_line];
                if let Some(ref action) = r.suggested_action {
                    lines.push(Line::from(vec![
                        Span::styled("  → ", Theme::dim()),
                        Span::styled(action.as_str(), Theme::normal()),
                    ]));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items);
        list.render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("ACTIVATED") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            let para = Paragraph::new(Span::styled(msg, style));
            para.render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("History ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Settings ", Theme::nav_label()),
            Span::styled("[p/P]", Theme::nav_key()),
            Span::styled("Plot ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[m]", Theme::nav_key()),
            Span::styled("Manual ", Theme::nav_label()),
            Span::styled("[e]", Theme::nav_key()),
            Span::styled("Export ", Theme::nav_label()),
            Span::styled("[i]", Theme::nav_key()),
            Span::styled("Import ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        let para = Paragraph::new(nav);
        para.render(area, buf);
    }
}
