use super::Rule;
use crate::logic::policy;
use crate::models::{
    DecisionReason, Recommendation, RecommendationCategory, SensorReading, Severity,
    ThresholdConfig,
};

/// Irrigation rule - surfaces the policy decision for the selected plot
///
/// Always produces a recommendation:
/// - Advisory: moisture below threshold, battery sufficient, no rain expected
/// - Info: any reason to wait (moisture sufficient, low battery, rain expected)
pub struct IrrigationRule;

impl Rule for IrrigationRule {
    fn id(&self) -> &'static str {
        "irrigation"
    }

    fn name(&self) -> &'static str {
        "Irrigation"
    }

    fn evaluate(
        &self,
        reading: &SensorReading,
        thresholds: &ThresholdConfig,
    ) -> Option<Recommendation> {
        let decision = policy::decide(reading, thresholds);

        let (severity, title) = if decision.should_irrigate {
            (Severity::Advisory, "Irrigation Recommended")
        } else {
            (Severity::Info, "Hold Irrigation")
        };

        let action = match decision.reason {
            DecisionReason::ConditionsFavorable => {
                "Start irrigation on this plot. Water early in the morning to limit evaporation."
            }
            DecisionReason::BatteryInsufficient => {
                "Recharge or replace the controller battery before irrigating."
            }
            DecisionReason::RainExpected => "Wait for the forecast rain and check moisture again.",
            DecisionReason::MoistureSufficient => "No action needed.",
        };

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::Irrigation,
                severity,
                title,
                decision.reason.to_string(),
            )
            .with_data_point(
                "Soil Moisture",
                format!(
                    "{}% (threshold {}%)",
                    reading.soil_moisture_percent, thresholds.moisture_threshold
                ),
            )
            .with_data_point(
                "Battery",
                format!(
                    "{}% (minimum {}%)",
                    reading.battery_percent, thresholds.min_battery_for_irrigation
                ),
            )
            .with_data_point("Rain Forecast", reading.rain_forecast)
            .with_action(action),
        )
    }
}
