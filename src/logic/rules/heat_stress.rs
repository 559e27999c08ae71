use super::Rule;
use crate::logic::policy;
use crate::models::{
    Recommendation, RecommendationCategory, SensorReading, Severity, ThresholdConfig,
    TEMPERATURE_ALERT_MESSAGE,
};

/// Heat stress rule - warns when ambient temperature reaches the configured limit
///
/// Does not influence the irrigation decision.
pub struct HeatStressRule;

impl Rule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn evaluate(
        &self,
        reading: &SensorReading,
        thresholds: &ThresholdConfig,
    ) -> Option<Recommendation> {
        if !policy::temperature_alert(reading, thresholds) {
            return None;
        }

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::HeatStress,
                Severity::Warning,
                "Heat Stress Warning",
                TEMPERATURE_ALERT_MESSAGE,
            )
            .with_data_point("Ambient Temp", format!("{}°C", reading.ambient_temp_c))
            .with_data_point("Alert Limit", format!("{}°C", thresholds.max_tolerable_temp))
            .with_action(
                "Inspect crops for wilting. Prefer irrigating early morning or late evening.",
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RainForecast;

    #[test]
    fn no_warning_below_limit() {
        let reading = SensorReading::new(40, 37, 50, RainForecast::None);
        assert!(HeatStressRule
            .evaluate(&reading, &ThresholdConfig::default())
            .is_none());
    }

    #[test]
    fn warning_at_limit() {
        let reading = SensorReading::new(40, 38, 50, RainForecast::None);
        let rec = HeatStressRule
            .evaluate(&reading, &ThresholdConfig::default())
            .unwrap();
        assert_eq!(rec.severity, Severity::Warning);
        assert_eq!(rec.description, TEMPERATURE_ALERT_MESSAGE);
        assert_eq!(rec.data_points[0].value, "38°C");
    }
}
