use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str = format!("{:.0}{}", value, self.unit);

                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);

                let para = Paragraph::new(value_line);
                para.render(inner, buf);

                // Render bar if space allows
                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (bar_area.width as f64 * ratio) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                let para = Paragraph::new(na_line);
                para.render(inner, buf);
            }
        }
    }
}

/// Ambient temperature in °C; turns hot at the alert limit.
pub fn temperature_gauge(title: &str, value: Option<f64>, max_temp_c: i32) -> GaugeWidget<'_> {
    let limit = f64::from(max_temp_c);
    GaugeWidget::new(title, value, " °C")
        .range(0.0, 50.0)
        .thresholds(vec![
            (f64::MIN, Theme::TEMP_MILD),
            (limit - 5.0, Theme::TEMP_WARM),
            (limit, Theme::TEMP_HOT),
        ])
}

/// Soil moisture in %; dry below the irrigation threshold.
pub fn moisture_gauge(title: &str, value: Option<f64>, threshold: u8) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (f64::MIN, Theme::MOISTURE_DRY),
            (f64::from(threshold), Theme::MOISTURE_OK),
        ])
}

pub fn battery_gauge(title: &str, value: Option<f64>, min_battery: u8) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (f64::MIN, Theme::ERROR),
            (f64::from(min_battery), Theme::SUCCESS),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moisture_gauge_color_switches_at_threshold() {
        let gauge = moisture_gauge("Moisture", Some(29.0), 30);
        assert_eq!(gauge.get_color(29.0), Theme::MOISTURE_DRY);
        assert_eq!(gauge.get_color(30.0), Theme::MOISTURE_OK);
    }

    #[test]
    fn temperature_gauge_bands() {
        let gauge = temperature_gauge("Temp", None, 38);
        assert_eq!(gauge.get_color(20.0), Theme::TEMP_MILD);
        assert_eq!(gauge.get_color(34.0), Theme::TEMP_WARM);
        assert_eq!(gauge.get_color(38.0), Theme::TEMP_HOT);
    }

    #[test]
    fn renders_value_and_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        battery_gauge("Battery", Some(50.0), 40).render(area, &mut buf);

        let row1: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(row1.contains("50%"));
        assert_eq!(buf[(1, 2)].symbol(), "█");
        assert_eq!(buf[(18, 2)].symbol(), "░");
    }
}
