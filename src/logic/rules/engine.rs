use super::{heat_stress::HeatStressRule, irrigation::IrrigationRule, Rule};
use crate::models::{Recommendation, SensorReading, ThresholdConfig};

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(IrrigationRule), Box::new(HeatStressRule)];

        Self { rules }
    }

    pub fn evaluate(
        &self,
        reading: &SensorReading,
        thresholds: &ThresholdConfig,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(reading, thresholds))
            .collect();

        // Most severe first
        recommendations.sort_by(|a, b| b.severity.cmp(&a.severity));
        recommendations
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RainForecast, RecommendationCategory, Severity};

    #[test]
    fn lists_registered_rules() {
        let engine = RulesEngine::new();
        let ids: Vec<&str> = engine.list_rules().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["irrigation", "heat_stress"]);
    }

    #[test]
    fn hot_dry_field_yields_both_rules_warning_first() {
        let engine = RulesEngine::new();
        let reading = SensorReading::new(20, 42, 60, RainForecast::None);
        let recs = engine.evaluate(&reading, &ThresholdConfig::default());

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, RecommendationCategory::HeatStress);
        assert_eq!(recs[0].severity, Severity::Warning);
        assert_eq!(recs[1].category, RecommendationCategory::Irrigation);
    }

    #[test]
    fn mild_field_yields_only_irrigation() {
        let engine = RulesEngine::new();
        let reading = SensorReading::new(45, 25, 60, RainForecast::Low);
        let recs = engine.evaluate(&reading, &ThresholdConfig::default());

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "irrigation");
    }
}
