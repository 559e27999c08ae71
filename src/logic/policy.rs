use crate::models::{DecisionReason, IrrigationDecision, SensorReading, ThresholdConfig};

/// Irrigation decision for a reading. The first matching branch wins:
/// sufficient moisture, then low battery, then rain in the forecast.
pub fn decide(reading: &SensorReading, thresholds: &ThresholdConfig) -> IrrigationDecision {
    if reading.soil_moisture_percent >= thresholds.moisture_threshold {
        return IrrigationDecision::hold(DecisionReason::MoistureSufficient);
    }

    if reading.battery_percent < thresholds.min_battery_for_irrigation {
        return IrrigationDecision::hold(DecisionReason::BatteryInsufficient);
    }

    if reading.rain_forecast.is_expected() {
        return IrrigationDecision::hold(DecisionReason::RainExpected);
    }

    IrrigationDecision::irrigate(DecisionReason::ConditionsFavorable)
}

/// Independent of [`decide`].
pub fn temperature_alert(reading: &SensorReading, thresholds: &ThresholdConfig) -> bool {
    reading.ambient_temp_c >= thresholds.max_tolerable_temp
}
