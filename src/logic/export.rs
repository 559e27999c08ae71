//! Plain-text configuration export.
//!
//! The file is a flat list of `key=value` lines in a fixed order:
//!
//! ```text
//! parcela=North Plot
//! bateria_minima=40
//! humedad_umbral=30
//! temperatura_maxima=38
//! tolerancia_sequia=Alta
//! ```

use crate::error::{Result, SmartAgroError};
use crate::models::{DroughtTolerance, ThresholdConfig};
use std::path::Path;

const KEY_PLOT: &str = "parcela";
const KEY_MIN_BATTERY: &str = "bateria_minima";
const KEY_MOISTURE: &str = "humedad_umbral";
const KEY_MAX_TEMP: &str = "temperatura_maxima";
const KEY_TOLERANCE: &str = "tolerancia_sequia";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSettings {
    pub plot: String,
    pub thresholds: ThresholdConfig,
}

impl ExportedSettings {
    pub fn new(plot: impl Into<String>, thresholds: ThresholdConfig) -> Self {
        Self {
            plot: plot.into(),
            thresholds,
        }
    }

    pub fn to_text(&self) -> String {
        let t = &self.thresholds;
        [
            format!("{}={}", KEY_PLOT, self.plot),
            format!("{}={}", KEY_MIN_BATTERY, t.min_battery_for_irrigation),
            format!("{}={}", KEY_MOISTURE, t.moisture_threshold),
            format!("{}={}", KEY_MAX_TEMP, t.max_tolerable_temp),
            format!("{}={}", KEY_TOLERANCE, t.drought_tolerance.export_label()),
        ]
        .join("\n")
    }

    /// Parses an exported file. Unknown keys and blank lines are ignored;
    /// every known key is required and values go through range validation.
    pub fn parse(text: &str) -> Result<Self> {
        let mut plot = None;
        let mut min_battery = None;
        let mut moisture = None;
        let mut max_temp = None;
        let mut tolerance = None;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                SmartAgroError::invalid(
                    "export",
                    format!("line {} is not a key=value pair", lineno + 1),
                )
            })?;
            let value = value.trim();

            match key.trim() {
                KEY_PLOT => plot = Some(value.to_string()),
                KEY_MIN_BATTERY => min_battery = Some(parse_int(KEY_MIN_BATTERY, value)?),
                KEY_MOISTURE => moisture = Some(parse_int(KEY_MOISTURE, value)?),
                KEY_MAX_TEMP => max_temp = Some(parse_int(KEY_MAX_TEMP, value)?),
                KEY_TOLERANCE => {
                    tolerance = Some(DroughtTolerance::from_str(value).ok_or_else(|| {
                        SmartAgroError::invalid(
                            KEY_TOLERANCE,
                            format!("'{}' is not a drought tolerance", value),
                        )
                    })?)
                }
                other => tracing::debug!("Ignoring unknown export key '{}'", other),
            }
        }

        let plot = plot
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing(KEY_PLOT))?;
        let thresholds = ThresholdConfig::new(
            min_battery.ok_or_else(|| missing(KEY_MIN_BATTERY))?,
            moisture.ok_or_else(|| missing(KEY_MOISTURE))?,
            max_temp.ok_or_else(|| missing(KEY_MAX_TEMP))?,
            tolerance.ok_or_else(|| missing(KEY_TOLERANCE))?,
        )?;

        Ok(Self { plot, thresholds })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_text())?;
        tracing::info!("Exported configuration for {} to {}", self.plot, path.display());
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

fn parse_int(key: &str, value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| SmartAgroError::invalid(key, format!("'{}' is not an integer", value)))
}

fn missing(key: &str) -> SmartAgroError {
    SmartAgroError::invalid(key, "missing from export")
}
