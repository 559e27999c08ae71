use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainForecast {
    High,
    Low,
    None,
}

impl RainForecast {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainForecast::High => "High",
            RainForecast::Low => "Low",
            RainForecast::None => "None",
        }
    }

    pub fn is_expected(&self) -> bool {
        !matches!(self, RainForecast::None)
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RainForecast::High => Color::LightBlue,
            RainForecast::Low => Color::Cyan,
            RainForecast::None => Color::Yellow,
        }
    }
}

impl std::fmt::Display for RainForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Instantaneous field conditions for a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub soil_moisture_percent: u8,
    pub ambient_temp_c: i32,
    pub battery_percent: u8,
    pub rain_forecast: RainForecast,
}

impl SensorReading {
    pub fn new(
        soil_moisture_percent: u8,
        ambient_temp_c: i32,
        battery_percent: u8,
        rain_forecast: RainForecast,
    ) -> Self {
        Self {
            soil_moisture_percent,
            ambient_temp_c,
            battery_percent,
            rain_forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_forecast_expected() {
        assert!(RainForecast::High.is_expected());
        assert!(RainForecast::Low.is_expected());
        assert!(!RainForecast::None.is_expected());
    }

    #[test]
    fn rain_forecast_display() {
        assert_eq!(RainForecast::High.to_string(), "High");
        assert_eq!(RainForecast::Low.to_string(), "Low");
        assert_eq!(RainForecast::None.to_string(), "None");
    }

    #[test]
    fn sensor_reading_serializes_field_names() {
        let reading = SensorReading::new(20, 31, 50, RainForecast::Low);
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["soil_moisture_percent"], 20);
        assert_eq!(json["ambient_temp_c"], 31);
        assert_eq!(json["battery_percent"], 50);
        assert_eq!(json["rain_forecast"], "Low");
    }
}
