use crate::error::{Result, SmartAgroError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const BATTERY_RANGE: RangeInclusive<i32> = 0..=100;
pub const MOISTURE_RANGE: RangeInclusive<i32> = 0..=100;
pub const MAX_TEMP_RANGE: RangeInclusive<i32> = 20..=50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroughtTolerance {
    #[default]
    High,
    Medium,
    Low,
}

impl DroughtTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroughtTolerance::High => "High",
            DroughtTolerance::Medium => "Medium",
            DroughtTolerance::Low => "Low",
        }
    }

    /// Label written to the `tolerancia_sequia` key of exported files.
    pub fn export_label(&self) -> &'static str {
        match self {
            DroughtTolerance::High => "Alta",
            DroughtTolerance::Medium => "Media",
            DroughtTolerance::Low => "Baja",
        }
    }

    /// Accepts the English names as well as the Spanish export labels.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Some(DroughtTolerance::High),
            "medium" | "media" => Some(DroughtTolerance::Medium),
            "low" | "baja" => Some(DroughtTolerance::Low),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            DroughtTolerance::High => DroughtTolerance::Medium,
            DroughtTolerance::Medium => DroughtTolerance::Low,
            DroughtTolerance::Low => DroughtTolerance::High,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            DroughtTolerance::High => DroughtTolerance::Low,
            DroughtTolerance::Medium => DroughtTolerance::High,
            DroughtTolerance::Low => DroughtTolerance::Medium,
        }
    }
}

impl std::fmt::Display for DroughtTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator-set limits the irrigation policy is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub min_battery_for_irrigation: u8,
    pub moisture_threshold: u8,
    pub max_tolerable_temp: i32,
    pub drought_tolerance: DroughtTolerance,
}

impl ThresholdConfig {
    /// Builds a config from raw operator values, rejecting anything out of range.
    pub fn new(
        min_battery_for_irrigation: i32,
        moisture_threshold: i32,
        max_tolerable_temp: i32,
        drought_tolerance: DroughtTolerance,
    ) -> Result<Self> {
        let min_battery_for_irrigation =
            check_range("min_battery_percent", min_battery_for_irrigation, &BATTERY_RANGE)?;
        let moisture_threshold =
            check_range("moisture_threshold_percent", moisture_threshold, &MOISTURE_RANGE)?;
        let max_tolerable_temp = check_range("max_temp_c", max_tolerable_temp, &MAX_TEMP_RANGE)?;

        Ok(Self {
            min_battery_for_irrigation: min_battery_for_irrigation as u8,
            moisture_threshold: moisture_threshold as u8,
            max_tolerable_temp,
            drought_tolerance,
        })
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_battery_for_irrigation: 40,
            moisture_threshold: 30,
            max_tolerable_temp: 38,
            drought_tolerance: DroughtTolerance::High,
        }
    }
}

fn check_range(field: &str, value: i32, range: &RangeInclusive<i32>) -> Result<i32> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(SmartAgroError::invalid(
            field,
            format!(
                "{} is outside the allowed range {}..={}",
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}
