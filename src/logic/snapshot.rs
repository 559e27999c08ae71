use super::policy;
use super::simulator::ReadingSimulator;
use crate::models::{HistoricalSeries, IrrigationDecision, SensorReading, ThresholdConfig};
use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;

/// Everything the dashboard shows for one plot at one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub plot: String,
    pub captured_at: DateTime<Local>,
    pub reading: SensorReading,
    pub decision: IrrigationDecision,
    pub temperature_alert: bool,
    pub history: HistoricalSeries,
}

impl FieldSnapshot {
    pub fn capture<R: Rng>(
        simulator: &mut ReadingSimulator<R>,
        plot: &str,
        thresholds: &ThresholdConfig,
        now: DateTime<Local>,
        history_hours: usize,
    ) -> Self {
        let reading = simulator.current_reading();
        let history = simulator.historical_series(now, history_hours);

        let snapshot = Self {
            plot: plot.to_string(),
            captured_at: now,
            reading,
            decision: policy::decide(&reading, thresholds),
            temperature_alert: policy::temperature_alert(&reading, thresholds),
            history,
        };

        tracing::debug!(
            plot = %snapshot.plot,
            moisture = reading.soil_moisture_percent,
            temp = reading.ambient_temp_c,
            battery = reading.battery_percent,
            rain = %reading.rain_forecast,
            irrigate = snapshot.decision.should_irrigate,
            "Captured field snapshot"
        );

        snapshot
    }

    /// Re-applies the policy to the same reading after thresholds change.
    pub fn reevaluate(&mut self, thresholds: &ThresholdConfig) {
        self.decision = policy::decide(&self.reading, thresholds);
        self.temperature_alert = policy::temperature_alert(&self.reading, thresholds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::models::DecisionReason;

    #[test]
    fn capture_is_consistent_with_policy() {
        let mut sim = ReadingSimulator::seeded(21, &SimulationConfig::default()).unwrap();
        let thresholds = ThresholdConfig::default();
        let now = Local::now();

        for _ in 0..50 {
            let snap = FieldSnapshot::capture(&mut sim, "North Plot", &thresholds, now, 24);
            assert_eq!(snap.plot, "North Plot");
            assert_eq!(snap.history.len(), 24);
            assert_eq!(snap.decision, policy::decide(&snap.reading, &thresholds));
            assert_eq!(
                snap.temperature_alert,
                snap.reading.ambient_temp_c >= thresholds.max_tolerable_temp
            );
        }
    }

    #[test]
    fn reevaluate_keeps_reading() {
        let mut sim = ReadingSimulator::seeded(4, &SimulationConfig::default()).unwrap();
        let mut thresholds = ThresholdConfig::default();
        let mut snap = FieldSnapshot::capture(&mut sim, "South Plot", &thresholds, Local::now(), 24);
        let reading = snap.reading;

        // Simulated moisture and battery never reach 100%, so the battery branch decides.
        thresholds.moisture_threshold = 100;
        thresholds.min_battery_for_irrigation = 100;
        snap.reevaluate(&thresholds);

        assert_eq!(snap.reading, reading);
        assert_eq!(snap.decision.reason, DecisionReason::BatteryInsufficient);

        thresholds.moisture_threshold = 0;
        snap.reevaluate(&thresholds);
        assert_eq!(snap.decision.reason, DecisionReason::MoistureSufficient);
    }

    #[test]
    fn serializes_to_json() {
        let mut sim = ReadingSimulator::seeded(8, &SimulationConfig::default()).unwrap();
        let snap = FieldSnapshot::capture(
            &mut sim,
            "Central Plot",
            &ThresholdConfig::default(),
            Local::now(),
            3,
        );
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["plot"], "Central Plot");
        assert_eq!(json["history"]["points"].as_array().unwrap().len(), 3);
        assert!(json["decision"]["reason"].is_string());
    }
}
