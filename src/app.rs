use crate::config::Config;
use crate::logic::{ExportedSettings, FieldSnapshot, ReadingSimulator, RulesEngine};
use crate::models::{Recommendation, ThresholdConfig};
use crate::ui::screens::SettingsField;
use chrono::Local;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    History,
    Settings,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::History),
            's' | 'S' => Some(Screen::Settings),
            _ => None,
        }
    }
}

pub struct SettingsState {
    pub focused_field: SettingsField,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            focused_field: SettingsField::Plot,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,

    // Session state
    pub thresholds: ThresholdConfig,
    pub selected_plot: usize,
    pub snapshot: FieldSnapshot,
    pub recommendations: Vec<Recommendation>,

    // Screen states
    pub settings_state: SettingsState,

    // Services
    pub rules_engine: RulesEngine,
    simulator: ReadingSimulator,
    export_path: PathBuf,

    // UI state
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        config: Config,
        thresholds: ThresholdConfig,
        mut simulator: ReadingSimulator,
        selected_plot: usize,
        export_path: PathBuf,
    ) -> Self {
        let selected_plot = selected_plot.min(config.farm.plots.len().saturating_sub(1));
        let plot = plot_name(&config, selected_plot).to_string();
        let snapshot = FieldSnapshot::capture(
            &mut simulator,
            &plot,
            &thresholds,
            Local::now(),
            config.simulation.history_hours,
        );

        let rules_engine = RulesEngine::new();
        let recommendations = rules_engine.evaluate(&snapshot.reading, &thresholds);

        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            thresholds,
            selected_plot,
            snapshot,
            recommendations,
            settings_state: SettingsState::new(),
            rules_engine,
            simulator,
            export_path,
            status_message: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn plot_name(&self) -> &str {
        plot_name(&self.config, self.selected_plot)
    }

    pub fn plot_count(&self) -> usize {
        self.config.farm.plots.len()
    }

    /// Draws a fresh reading and history for the selected plot.
    pub fn refresh(&mut self) {
        self.capture();
        tracing::info!(plot = %self.snapshot.plot, "Refreshed sensor data");
        self.set_status("Data refreshed");
    }

    pub fn next_plot(&mut self) {
        let count = self.plot_count();
        if count == 0 {
            return;
        }
        self.select_plot((self.selected_plot + 1) % count);
    }

    pub fn prev_plot(&mut self) {
        let count = self.plot_count();
        if count == 0 {
            return;
        }
        self.select_plot((self.selected_plot + count - 1) % count);
    }

    fn select_plot(&mut self, index: usize) {
        if index == self.selected_plot {
            return;
        }
        self.selected_plot = index;
        self.capture();
        tracing::info!(plot = %self.snapshot.plot, "Selected plot");
        self.set_status(&format!("Switched to {}", self.snapshot.plot));
    }

    fn capture(&mut self) {
        let plot = self.plot_name().to_string();
        self.snapshot = FieldSnapshot::capture(
            &mut self.simulator,
            &plot,
            &self.thresholds,
            Local::now(),
            self.config.simulation.history_hours,
        );
        self.evaluate_rules();
    }

    pub fn evaluate_rules(&mut self) {
        self.recommendations = self
            .rules_engine
            .evaluate(&self.snapshot.reading, &self.thresholds);
    }

    /// Moves the focused settings field by `delta` slider steps, clamped to its range.
    /// Threshold changes re-evaluate the current reading without drawing new values.
    pub fn adjust_setting(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }

        let field = self.settings_state.focused_field;
        if field == SettingsField::Plot {
            if delta > 0 {
                self.next_plot();
            } else {
                self.prev_plot();
            }
            return;
        }

        let t = &mut self.thresholds;
        match field {
            SettingsField::Plot => {}
            SettingsField::DroughtTolerance => {
                t.drought_tolerance = if delta > 0 {
                    t.drought_tolerance.next()
                } else {
                    t.drought_tolerance.prev()
                };
            }
            SettingsField::MinBattery => {
                t.min_battery_for_irrigation =
                    step(field, i32::from(t.min_battery_for_irrigation), delta) as u8;
            }
            SettingsField::MoistureThreshold => {
                t.moisture_threshold = step(field, i32::from(t.moisture_threshold), delta) as u8;
            }
            SettingsField::MaxTemp => {
                t.max_tolerable_temp = step(field, t.max_tolerable_temp, delta);
            }
        }

        self.snapshot.reevaluate(&self.thresholds);
        self.evaluate_rules();
        tracing::debug!(thresholds = ?self.thresholds, "Thresholds adjusted");
    }

    /// Acknowledges a manual irrigation request. No actuator is driven.
    pub fn manual_irrigation(&mut self) {
        tracing::info!(plot = %self.snapshot.plot, "Manual irrigation requested");
        let msg = format!("Manual irrigation ACTIVATED for {}", self.snapshot.plot);
        self.set_status(&msg);
    }

    pub fn export(&mut self) {
        let settings = ExportedSettings::new(self.plot_name(), self.thresholds);
        match settings.write_to(&self.export_path) {
            Ok(()) => {
                let msg = format!("Configuration exported to {}", self.export_path.display());
                self.set_status(&msg);
            }
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                self.set_status(&format!("Export failed: {}", e));
            }
        }
    }

    /// Restores thresholds and plot from the export file.
    pub fn import(&mut self) {
        let settings = match ExportedSettings::read_from(&self.export_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Import failed: {}", e);
                self.set_status(&format!("Import failed: {}", e));
                return;
            }
        };

        self.thresholds = settings.thresholds;
        let plot_index = self.config.plot_index(&settings.plot);
        match plot_index {
            Some(index) if index != self.selected_plot => {
                self.selected_plot = index;
                self.capture();
            }
            _ => {
                self.snapshot.reevaluate(&self.thresholds);
                self.evaluate_rules();
            }
        }
        tracing::info!(
            plot = %settings.plot,
            path = %self.export_path.display(),
            "Imported configuration"
        );

        let msg = match plot_index {
            Some(_) => format!("Configuration imported from {}", self.export_path.display()),
            None => format!(
                "Thresholds imported; plot '{}' is not configured, keeping {}",
                settings.plot,
                self.plot_name()
            ),
        };
        self.set_status(&msg);
    }
}

fn plot_name(config: &Config, index: usize) -> &str {
    config
        .farm
        .plots
        .get(index)
        .map(String::as_str)
        .unwrap_or("Plot")
}

fn step(field: SettingsField, current: i32, delta: i32) -> i32 {
    match field.range() {
        Some(range) => (current + delta).clamp(*range.start(), *range.end()),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DroughtTolerance;

    fn app_with_export(path: PathBuf) -> App {
        let config = Config::default();
        let sim = ReadingSimulator::seeded(7, &config.simulation).unwrap();
        App::new(config, ThresholdConfig::default(), sim, 0, path)
    }

    fn app() -> App {
        app_with_export(PathBuf::from("unused.txt"))
    }

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_key('2'), Some(Screen::History));
        assert_eq!(Screen::from_key('s'), Some(Screen::Settings));
        assert_eq!(Screen::from_key('x'), None);
    }

    #[test]
    fn starts_on_first_plot_with_history() {
        let app = app();
        assert_eq!(app.plot_name(), "North Plot");
        assert_eq!(app.snapshot.plot, "North Plot");
        assert_eq!(app.snapshot.history.len(), 24);
        assert!(!app.recommendations.is_empty());
    }

    #[test]
    fn out_of_range_plot_index_is_clamped() {
        let config = Config::default();
        let sim = ReadingSimulator::seeded(7, &config.simulation).unwrap();
        let app = App::new(config, ThresholdConfig::default(), sim, 10, PathBuf::new());
        assert_eq!(app.plot_name(), "South Plot");
    }

    #[test]
    fn plot_navigation_wraps() {
        let mut app = app();
        app.prev_plot();
        assert_eq!(app.plot_name(), "South Plot");
        assert_eq!(app.snapshot.plot, "South Plot");
        app.next_plot();
        app.next_plot();
        assert_eq!(app.plot_name(), "Central Plot");
        assert_eq!(app.status_message.as_deref(), Some("Switched to Central Plot"));
    }

    #[test]
    fn adjusting_threshold_keeps_reading() {
        let mut app = app();
        let reading = app.snapshot.reading;
        app.settings_state.focused_field = SettingsField::MoistureThreshold;

        app.adjust_setting(100);
        assert_eq!(app.thresholds.moisture_threshold, 100);
        assert_eq!(app.snapshot.reading, reading);
        // Simulated moisture never reaches 100%, so the decision leaves the sufficient branch.
        assert_ne!(
            app.snapshot.decision.reason,
            crate::models::DecisionReason::MoistureSufficient
        );

        app.adjust_setting(-1000);
        assert_eq!(app.thresholds.moisture_threshold, 0);
        assert!(!app.snapshot.decision.should_irrigate);
    }

    #[test]
    fn max_temp_clamps_to_slider_range() {
        let mut app = app();
        app.settings_state.focused_field = SettingsField::MaxTemp;
        app.adjust_setting(-10);
        app.adjust_setting(-10);
        assert_eq!(app.thresholds.max_tolerable_temp, 20);
        app.adjust_setting(100);
        assert_eq!(app.thresholds.max_tolerable_temp, 50);
        let t = app.thresholds;
        assert!(ThresholdConfig::new(
            i32::from(t.min_battery_for_irrigation),
            i32::from(t.moisture_threshold),
            t.max_tolerable_temp,
            t.drought_tolerance,
        )
        .is_ok());
    }

    #[test]
    fn drought_tolerance_cycles() {
        let mut app = app();
        app.settings_state.focused_field = SettingsField::DroughtTolerance;
        app.adjust_setting(1);
        assert_eq!(app.thresholds.drought_tolerance, DroughtTolerance::Medium);
        app.adjust_setting(-1);
        assert_eq!(app.thresholds.drought_tolerance, DroughtTolerance::High);
    }

    #[test]
    fn plot_field_switches_plot() {
        let mut app = app();
        app.settings_state.focused_field = SettingsField::Plot;
        app.adjust_setting(1);
        assert_eq!(app.plot_name(), "Central Plot");
    }

    #[test]
    fn manual_irrigation_sets_status_only() {
        let mut app = app();
        let before = app.snapshot.clone();
        app.manual_irrigation();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Manual irrigation ACTIVATED for North Plot")
        );
        assert_eq!(app.snapshot.reading, before.reading);
    }

    #[test]
    fn export_writes_current_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuracion_riego.txt");
        let mut app = app_with_export(path.clone());
        app.next_plot();
        app.settings_state.focused_field = SettingsField::MinBattery;
        app.adjust_setting(-5);

        app.export();

        let exported = ExportedSettings::read_from(&path).unwrap();
        assert_eq!(exported.plot, "Central Plot");
        assert_eq!(exported.thresholds.min_battery_for_irrigation, 35);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Configuration exported"));
    }

    #[test]
    fn export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let mut app = app_with_export(dir.path().to_path_buf());
        app.export();
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Export failed"));
    }

    #[test]
    fn import_restores_exported_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuracion_riego.txt");
        let mut app = app_with_export(path);
        app.prev_plot();
        app.settings_state.focused_field = SettingsField::MaxTemp;
        app.adjust_setting(4);
        app.export();

        app.next_plot();
        app.adjust_setting(-10);
        assert_eq!(app.thresholds.max_tolerable_temp, 32);

        app.import();
        assert_eq!(app.plot_name(), "South Plot");
        assert_eq!(app.snapshot.plot, "South Plot");
        assert_eq!(app.thresholds.max_tolerable_temp, 42);
        assert_eq!(
            app.snapshot.temperature_alert,
            app.snapshot.reading.ambient_temp_c >= 42
        );
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Configuration imported"));
    }

    #[test]
    fn import_keeps_plot_when_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuracion_riego.txt");
        std::fs::write(
            &path,
            "parcela=Parcela Este
bateria_minima=10
humedad_umbral=20
             temperatura_maxima=30
tolerancia_sequia=Media",
        )
        .unwrap();

        let mut app = app_with_export(path);
        app.import();
        assert_eq!(app.plot_name(), "North Plot");
        assert_eq!(app.thresholds.min_battery_for_irrigation, 10);
        assert_eq!(app.thresholds.drought_tolerance, DroughtTolerance::Medium);
        assert!(app.status_message.as_deref().unwrap().contains("not configured"));
    }

    #[test]
    fn import_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_export(dir.path().join("missing.txt"));
        let before = app.thresholds;
        app.import();
        assert_eq!(app.thresholds, before);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Import failed"));
    }

    #[test]
    fn refresh_redraws_reading() {
        let mut app = app();
        app.set_status("x");
        app.refresh();
        assert_eq!(app.status_message.as_deref(), Some("Data refreshed"));
        assert_eq!(app.snapshot.history.len(), 24);
    }
}
