use crate::models::{ThresholdConfig, BATTERY_RANGE, MAX_TEMP_RANGE, MOISTURE_RANGE};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Plot,
    MinBattery,
    MoistureThreshold,
    MaxTemp,
    DroughtTolerance,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Plot,
            SettingsField::MinBattery,
            SettingsField::MoistureThreshold,
            SettingsField::MaxTemp,
            SettingsField::DroughtTolerance,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Plot => "Plot",
            SettingsField::MinBattery => "Minimum battery for irrigation (%)",
            SettingsField::MoistureThreshold => "Moisture threshold (%)",
            SettingsField::MaxTemp => "Maximum tolerated temperature (°C)",
            SettingsField::DroughtTolerance => "Crop drought tolerance",
        }
    }

    /// Slider range for numeric fields.
    pub fn range(&self) -> Option<RangeInclusive<i32>> {
        match self {
            SettingsField::MinBattery => Some(BATTERY_RANGE),
            SettingsField::MoistureThreshold => Some(MOISTURE_RANGE),
            SettingsField::MaxTemp => Some(MAX_TEMP_RANGE),
            SettingsField::Plot | SettingsField::DroughtTolerance => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SettingsField::Plot => SettingsField::MinBattery,
            SettingsField::MinBattery => SettingsField::MoistureThreshold,
            SettingsField::MoistureThreshold => SettingsField::MaxTemp,
            SettingsField::MaxTemp => SettingsField::DroughtTolerance,
            SettingsField::DroughtTolerance => SettingsField::Plot,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SettingsField::Plot => SettingsField::DroughtTolerance,
            SettingsField::MinBattery => SettingsField::Plot,
            SettingsField::MoistureThreshold => SettingsField::MinBattery,
            SettingsField::MaxTemp => SettingsField::MoistureThreshold,
            SettingsField::DroughtTolerance => SettingsField::MaxTemp,
        }
    }

    /// Numeric value of the field, if it has one.
    pub fn numeric_value(&self, thresholds: &ThresholdConfig) -> Option<i32> {
        match self {
            SettingsField::MinBattery => Some(i32::from(thresholds.min_battery_for_irrigation)),
            SettingsField::MoistureThreshold => Some(i32::from(thresholds.moisture_threshold)),
            SettingsField::MaxTemp => Some(thresholds.max_tolerable_temp),
            SettingsField::Plot | SettingsField::DroughtTolerance => None,
        }
    }
}

pub struct SettingsScreen<'a> {
    pub plot: &'a str,
    pub thresholds: &'a ThresholdConfig,
    pub focused_field: SettingsField,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(plot: &'a str, thresholds: &'a ThresholdConfig) -> Self {
        Self {
            plot,
            thresholds,
            focused_field: SettingsField::Plot,
        }
    }

    pub fn with_focus(mut self, field: SettingsField) -> Self {
        self.focused_field = field;
        self
    }

    fn get_field_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Plot => self.plot.to_string(),
            SettingsField::DroughtTolerance => self.thresholds.drought_tolerance.to_string(),
            numeric => numeric
                .numeric_value(self.thresholds)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl Widget for SettingsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(17),   // Form (5 fields * 3 lines + borders)
                Constraint::Length(5), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Settings", Theme::title()),
            Span::styled(" - Irrigation Thresholds", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_form(chunks[1], buf);
        self.render_help(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Adjust ", Theme::nav_label()),
            Span::styled("[PgUp/PgDn]", Theme::nav_key()),
            Span::styled("±10 ", Theme::nav_label()),
            Span::styled("[e]", Theme::nav_key()),
            Span::styled("Export ", Theme::nav_label()),
            Span::styled("[i]", Theme::nav_key()),
            Span::styled("Import ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl SettingsScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Thresholds")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let field_height = 3;
        let constraints: Vec<Constraint> = SettingsField::all()
            .iter()
            .map(|_| Constraint::Length(field_height))
            .collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in SettingsField::all().iter().enumerate() {
            let is_focused = *field == self.focused_field;

            let border_style = if is_focused {
                Theme::border_focused()
            } else {
                Theme::border()
            };

            let value_style = if is_focused {
                Theme::selected()
            } else {
                Theme::normal()
            };

            let field_block = Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style);

            let value = self.get_field_value(*field);
            let mut spans = vec![Span::styled(format!(" {:>4} ", value), value_style)];

            if let (Some(range), Some(current)) =
                (field.range(), field.numeric_value(self.thresholds))
            {
                let width = field_areas[i].width.saturating_sub(12) as usize;
                spans.push(Span::raw(" "));
                spans.push(Span::styled(slider(current, &range, width), Theme::highlight()));
            } else {
                spans.push(Span::styled("  ◀ ▶", Theme::dim()));
            }

            Paragraph::new(Line::from(spans))
                .block(field_block)
                .render(field_areas[i], buf);
        }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let help_text = match self.focused_field {
            SettingsField::Plot => "Field plot to monitor. Changing it takes a new reading.",
            SettingsField::MinBattery => {
                "Irrigation is held while the controller battery is below this level."
            }
            SettingsField::MoistureThreshold => {
                "Irrigation is considered only while soil moisture is below this value."
            }
            SettingsField::MaxTemp => {
                "A heat stress alert is raised at or above this ambient temperature."
            }
            SettingsField::DroughtTolerance => {
                "Informational crop attribute. Included in exports, not used by the policy."
            }
        };

        let para = Paragraph::new(Span::styled(help_text, Theme::dim())).block(block);
        para.render(area, buf);
    }
}

/// Text slider, e.g. `0 ━━━━━●────── 100`.
fn slider(value: i32, range: &RangeInclusive<i32>, width: usize) -> String {
    let (lo, hi) = (*range.start(), *range.end());
    let label_lo = lo.to_string();
    let label_hi = hi.to_string();
    let track = width.saturating_sub(label_lo.len() + label_hi.len() + 2).max(1);

    let ratio = if hi > lo {
        f64::from(value.clamp(lo, hi) - lo) / f64::from(hi - lo)
    } else {
        0.0
    };
    let knob = ((track - 1) as f64 * ratio).round() as usize;

    let bar: String = (0..track)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect();

    format!("{} {} {}", label_lo, bar, label_hi)
}
