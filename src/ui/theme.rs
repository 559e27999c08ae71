use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const INFO: Color = Color::LightBlue;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Field colors
    pub const TEMP_MILD: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;
    pub const MOISTURE_DRY: Color = Color::Yellow;
    pub const MOISTURE_OK: Color = Color::Green;
    pub const MOISTURE_LINE: Color = Color::Blue;
    pub const TEMP_LINE: Color = Color::LightRed;
    pub const THRESHOLD_LINE: Color = Color::Gray;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn alert() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Red at or above the alert limit, yellow within 5°C of it.
    pub fn temp_color(temp_c: f64, max_temp_c: i32) -> Color {
        let limit = f64::from(max_temp_c);
        if temp_c >= limit {
            Self::TEMP_HOT
        } else if temp_c >= limit - 5.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_MILD
        }
    }

    pub fn moisture_color(moisture_percent: f64, threshold: u8) -> Color {
        if moisture_percent < f64::from(threshold) {
            Self::MOISTURE_DRY
        } else {
            Self::MOISTURE_OK
        }
    }

    pub fn battery_color(battery_percent: f64, min_battery: u8) -> Color {
        if battery_percent < f64::from(min_battery) {
            Self::ERROR
        } else {
            Self::SUCCESS
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
