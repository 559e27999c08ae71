use crate::error::{Result, SmartAgroError};
use crate::models::{
    DroughtTolerance, ThresholdConfig, BATTERY_RANGE, MAX_TEMP_RANGE, MOISTURE_RANGE,
};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest history the simulator will generate (one week of hourly points).
pub const MAX_HISTORY_HOURS: usize = 168;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    pub thresholds: ThresholdSettings,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub plots: Vec<String>,
}

/// Raw operator thresholds as written in config.yaml. Validated by [`Config::thresholds`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThresholdSettings {
    pub min_battery_percent: i32,
    pub moisture_threshold_percent: i32,
    pub max_temp_c: i32,
    pub drought_tolerance: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible readings. Random per run when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_history_hours")]
    pub history_hours: usize,
    #[serde(default = "default_moisture_mean")]
    pub moisture_mean: f64,
    #[serde(default = "default_moisture_std_dev")]
    pub moisture_std_dev: f64,
    #[serde(default = "default_temp_mean")]
    pub temp_mean: f64,
    #[serde(default = "default_temp_std_dev")]
    pub temp_std_dev: f64,
}

fn default_history_hours() -> usize {
    24
}

fn default_moisture_mean() -> f64 {
    40.0
}

fn default_moisture_std_dev() -> f64 {
    10.0
}

fn default_temp_mean() -> f64 {
    30.0
}

fn default_temp_std_dev() -> f64 {
    5.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_hours: default_history_hours(),
            moisture_mean: default_moisture_mean(),
            moisture_std_dev: default_moisture_std_dev(),
            temp_mean: default_temp_mean(),
            temp_std_dev: default_temp_std_dev(),
        }
    }
}

impl SimulationConfig {
    /// Rejects history lengths over [`MAX_HISTORY_HOURS`] and unusable distributions.
    pub fn validate(&self) -> Result<()> {
        if self.history_hours > MAX_HISTORY_HOURS {
            return Err(SmartAgroError::invalid(
                "simulation.history_hours",
                format!("{} exceeds the maximum of {}", self.history_hours, MAX_HISTORY_HOURS),
            ));
        }

        for (field, mean) in [
            ("simulation.moisture_mean", self.moisture_mean),
            ("simulation.temp_mean", self.temp_mean),
        ] {
            if !mean.is_finite() {
                return Err(SmartAgroError::invalid(field, "mean must be a finite number"));
            }
        }

        for (field, std_dev) in [
            ("simulation.moisture_std_dev", self.moisture_std_dev),
            ("simulation.temp_std_dev", self.temp_std_dev),
        ] {
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(SmartAgroError::invalid(
                    field,
                    format!("{} is not a finite, non-negative standard deviation", std_dev),
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_export_file_name() -> String {
    "configuracion_riego.txt".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SmartAgroError::Config(format!(
                "Config file not found at {:?}. Run `smartagro init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SmartAgroError::Config(format!("Failed to read config: {}", e)))?;

        tracing::debug!("Loaded configuration from {}", config_path.display());
        Self::from_yaml_str(&config_str)
    }

    /// Parses config.yaml contents after `${VAR}` substitution.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        serde_yaml::from_str(&content)
            .map_err(|e| SmartAgroError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("smartagro").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Loads the config, falling back to built-in defaults when auto-discovery finds
    /// nothing. An explicit override that does not exist is an error.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists(None) {
            return Self::load(config_override);
        }

        tracing::warn!(
            "No config file found, using built-in defaults. Run `smartagro init` to create one."
        );
        Ok(Self::default())
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/smartagro/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SmartAgroError::Config("Cannot determine config directory".into()))?
            .join("smartagro");
        Ok(config_dir.join("config.yaml"))
    }

    /// Converts the raw threshold settings into a validated [`ThresholdConfig`].
    pub fn thresholds(&self) -> Result<ThresholdConfig> {
        let t = &self.thresholds;
        let tolerance = DroughtTolerance::from_str(&t.drought_tolerance).ok_or_else(|| {
            SmartAgroError::invalid(
                "drought_tolerance",
                format!(
                    "'{}' is not one of High, Medium, Low",
                    t.drought_tolerance
                ),
            )
        })?;

        ThresholdConfig::new(
            t.min_battery_percent,
            t.moisture_threshold_percent,
            t.max_temp_c,
            tolerance,
        )
    }

    /// Checks everything the dashboard depends on and returns the validated thresholds.
    pub fn validate(&self) -> Result<ThresholdConfig> {
        if self.farm.plots.is_empty() {
            return Err(SmartAgroError::invalid(
                "farm.plots",
                "at least one plot is required",
            ));
        }
        if let Some(pos) = self.farm.plots.iter().position(|p| p.trim().is_empty()) {
            return Err(SmartAgroError::invalid(
                "farm.plots",
                format!("plot #{} has an empty name", pos + 1),
            ));
        }

        self.simulation.validate()?;

        if self.export.file_name.trim().is_empty() {
            return Err(SmartAgroError::invalid(
                "export.file_name",
                "file name must not be empty",
            ));
        }

        self.thresholds()
    }

    /// Index of the plot with the given name (case-insensitive).
    pub fn plot_index(&self, name: &str) -> Option<usize> {
        self.farm
            .plots
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name.trim()))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SmartAgro!");
        println!();

        // --- Farm ---
        println!("Farm");
        let farm_name: String = Input::new()
            .with_prompt("  Farm name")
            .default("SmartAgro".into())
            .interact_text()
            .map_err(|e| SmartAgroError::Config(format!("Input error: {}", e)))?;

        let plots_raw: String = Input::new()
            .with_prompt("  Plots (comma separated)")
            .default("North Plot, Central Plot, South Plot".into())
            .interact_text()
            .map_err(|e| SmartAgroError::Config(format!("Input error: {}", e)))?;

        let plots: Vec<String> = plots_raw
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        println!();

        // --- Thresholds ---
        println!("Irrigation thresholds");
        let min_battery = prompt_in_range("  Minimum battery for irrigation (%)", 40, BATTERY_RANGE)?;
        let moisture = prompt_in_range("  Moisture threshold (%)", 30, MOISTURE_RANGE)?;
        let max_temp = prompt_in_range("  Maximum tolerated temperature (°C)", 38, MAX_TEMP_RANGE)?;

        let tolerance: String = Input::new()
            .with_prompt("  Crop drought tolerance (High, Medium, Low)")
            .default("High".into())
            .validate_with(|v: &String| -> std::result::Result<(), String> {
                DroughtTolerance::from_str(v)
                    .map(|_| ())
                    .ok_or_else(|| "Enter High, Medium or Low".to_string())
            })
            .interact_text()
            .map_err(|e| SmartAgroError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name: farm_name,
                plots,
            },
            thresholds: ThresholdSettings {
                min_battery_percent: min_battery,
                moisture_threshold_percent: moisture,
                max_temp_c: max_temp,
                drought_tolerance: tolerance,
            },
            simulation: SimulationConfig::default(),
            export: ExportConfig::default(),
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SmartAgroError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SmartAgro Configuration\n# Generated by `smartagro init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SmartAgroError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("SMARTAGRO_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SmartAgroError::Config("Cannot determine data directory".into()))?
            .join("smartagro");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn export_path(&self, data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join(&self.export.file_name))
    }
}

fn prompt_in_range(
    prompt: &str,
    default: i32,
    range: std::ops::RangeInclusive<i32>,
) -> Result<i32> {
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|v: &i32| -> std::result::Result<(), String> {
            if range.contains(v) {
                Ok(())
            } else {
                Err(format!("Enter a value between {} and {}", range.start(), range.end()))
            }
        })
        .interact_text()
        .map_err(|e| SmartAgroError::Config(format!("Input error: {}", e)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "SmartAgro".into(),
                plots: vec![
                    "North Plot".into(),
                    "Central Plot".into(),
                    "South Plot".into(),
                ],
            },
            thresholds: ThresholdSettings {
                min_battery_percent: 40,
                moisture_threshold_percent: 30,
                max_temp_c: 38,
                drought_tolerance: "High".into(),
            },
            simulation: SimulationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
farm:
  name: Finca Demo
  plots: [North Plot, Central Plot, South Plot]
thresholds:
  min_battery_percent: 35
  moisture_threshold_percent: 25
  max_temp_c: 40
  drought_tolerance: medium
"#;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.farm.name, "Finca Demo");
        assert_eq!(config.farm.plots.len(), 3);
        assert_eq!(config.simulation.history_hours, 24);
        assert_eq!(config.simulation.seed, None);
        assert!((config.simulation.moisture_mean - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.export.file_name, "configuracion_riego.txt");

        let thresholds = config.validate().unwrap();
        assert_eq!(thresholds.min_battery_for_irrigation, 35);
        assert_eq!(thresholds.moisture_threshold, 25);
        assert_eq!(thresholds.max_tolerable_temp, 40);
        assert_eq!(thresholds.drought_tolerance, DroughtTolerance::Medium);
    }

    #[test]
    fn example_config_matches_defaults() {
        let config = Config::from_yaml_str(include_str!("../config/config.yaml.example")).unwrap();
        assert_eq!(config.farm.plots, Config::default().farm.plots);
        assert_eq!(config.validate().unwrap(), ThresholdConfig::default());
    }

    #[test]
    fn default_config_is_valid() {
        let thresholds = Config::default().validate().unwrap();
        assert_eq!(thresholds, ThresholdConfig::default());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.thresholds.moisture_threshold_percent = 101;
        assert!(matches!(
            config.validate(),
            Err(SmartAgroError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_unknown_drought_tolerance() {
        let mut config = Config::default();
        config.thresholds.drought_tolerance = "extreme".into();
        let err = config.thresholds().unwrap_err();
        assert!(err.to_string().contains("drought_tolerance"));
    }

    #[test]
    fn rejects_missing_or_blank_plots() {
        let mut config = Config::default();
        config.farm.plots.clear();
        assert!(config.validate().is_err());

        config.farm.plots = vec!["North".into(), "  ".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn rejects_excessive_history() {
        let mut config = Config::default();
        config.simulation.history_hours = MAX_HISTORY_HOURS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_std_dev() {
        let yaml = format!("{}simulation:\n  temp_std_dev: -5.0\n", SAMPLE);
        let config = Config::from_yaml_str(&yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SmartAgroError::InvalidConfig { ref field, .. } if field == "simulation.temp_std_dev"
        ));
        assert!(crate::logic::ReadingSimulator::from_config(&config.simulation).is_err());
    }

    #[test]
    fn rejects_non_finite_mean() {
        let mut config = Config::default();
        config.simulation.moisture_mean = f64::NAN;
        assert!(config.simulation.validate().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("typo.yaml");
        let err = Config::load_or_default(Some(missing)).unwrap_err();
        assert!(matches!(err, SmartAgroError::Config(ref msg) if msg.contains("not found")));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = Config::load_or_default(Some(path)).unwrap();
        assert_eq!(config.farm.name, "Finca Demo");
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("SMARTAGRO_TEST_FARM_NAME", "Env Farm");
        let yaml = SAMPLE.replace("Finca Demo", "${SMARTAGRO_TEST_FARM_NAME}");
        let config = Config::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.farm.name, "Env Farm");
    }

    #[test]
    fn plot_index_is_case_insensitive() {
        let config = Config::default();
        assert_eq!(config.plot_index("south plot"), Some(2));
        assert_eq!(config.plot_index(" North Plot "), Some(0));
        assert_eq!(config.plot_index("East Plot"), None);
    }

    #[test]
    fn export_path_uses_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let override_dir = dir.path().join("exports");
        let path = Config::default()
            .export_path(Some(&override_dir))
            .unwrap();
        assert_eq!(path, override_dir.join("configuracion_riego.txt"));
        assert!(override_dir.exists());
    }
}
