use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered box holding a single categorical value, e.g. the rain forecast.
pub struct MetricWidget<'a> {
    title: &'a str,
    value: String,
    color: Color,
}

impl<'a> MetricWidget<'a> {
    pub fn new(title: &'a str, value: impl std::fmt::Display) -> Self {
        Self {
            title,
            value: value.to_string(),
            color: Theme::FG,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for MetricWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 6 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let para = Paragraph::new(Span::styled(self.value, Style::default().fg(self.color)))
            .block(block);
        para.render(area, buf);
    }
}
