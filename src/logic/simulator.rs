//! Simulated field sensors.
//!
//! Current readings are uniform draws over fixed operating ranges; the hourly
//! history follows clamped normal distributions. The random source is generic so
//! tests can inject a seeded generator.

use crate::config::SimulationConfig;
use crate::error::{Result, SmartAgroError};
use crate::models::{HistoricalSeries, HistoryPoint, RainForecast, SensorReading};
use chrono::{DateTime, Duration, Local};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use std::ops::Range;

const SOIL_MOISTURE_RANGE: Range<u8> = 15..60;
const AMBIENT_TEMP_RANGE: Range<i32> = 20..45;
const BATTERY_RANGE: Range<u8> = 20..90;

/// Rain outcomes and their relative weights (20% / 40% / 40%).
const RAIN_OUTCOMES: [(RainForecast, u32); 3] = [
    (RainForecast::High, 2),
    (RainForecast::Low, 4),
    (RainForecast::None, 4),
];

pub const HISTORY_MOISTURE_BOUNDS: (f64, f64) = (10.0, 70.0);
pub const HISTORY_TEMP_BOUNDS: (f64, f64) = (20.0, 45.0);

pub struct ReadingSimulator<R: Rng = ChaCha8Rng> {
    rng: R,
    rain: WeightedIndex<u32>,
    moisture: Normal<f64>,
    temperature: Normal<f64>,
}

impl<R: Rng> ReadingSimulator<R> {
    pub fn new(rng: R, config: &SimulationConfig) -> Result<Self> {
        let moisture = normal(
            "simulation.moisture",
            config.moisture_mean,
            config.moisture_std_dev,
        )?;
        let temperature = normal("simulation.temp", config.temp_mean, config.temp_std_dev)?;
        let rain = WeightedIndex::new(RAIN_OUTCOMES.iter().map(|(_, w)| *w))
            .map_err(|e| SmartAgroError::invalid("rain_weights", e.to_string()))?;

        Ok(Self {
            rng,
            rain,
            moisture,
            temperature,
        })
    }

    pub fn current_reading(&mut self) -> SensorReading {
        let soil_moisture_percent = self.rng.gen_range(SOIL_MOISTURE_RANGE);
        let ambient_temp_c = self.rng.gen_range(AMBIENT_TEMP_RANGE);
        let battery_percent = self.rng.gen_range(BATTERY_RANGE);
        let rain_forecast = RAIN_OUTCOMES[self.rain.sample(&mut self.rng)].0;

        SensorReading {
            soil_moisture_percent,
            ambient_temp_c,
            battery_percent,
            rain_forecast,
        }
    }

    /// `count` hourly points ending at `now` (inclusive), oldest first.
    pub fn historical_series(&mut self, now: DateTime<Local>, count: usize) -> HistoricalSeries {
        let (m_lo, m_hi) = HISTORY_MOISTURE_BOUNDS;
        let (t_lo, t_hi) = HISTORY_TEMP_BOUNDS;

        let points = (0..count)
            .map(|i| {
                let hours_back = (count - 1 - i) as i64;
                HistoryPoint {
                    timestamp: now - Duration::hours(hours_back),
                    moisture_percent: self.moisture.sample(&mut self.rng).clamp(m_lo, m_hi),
                    temp_c: self.temperature.sample(&mut self.rng).clamp(t_lo, t_hi),
                }
            })
            .collect();

        HistoricalSeries::new(points)
    }
}

impl ReadingSimulator<ChaCha8Rng> {
    pub fn seeded(seed: u64, config: &SimulationConfig) -> Result<Self> {
        Self::new(ChaCha8Rng::seed_from_u64(seed), config)
    }

    pub fn from_entropy(config: &SimulationConfig) -> Result<Self> {
        Self::new(ChaCha8Rng::from_entropy(), config)
    }

    /// Seeded when the config carries a seed, otherwise seeded from the OS.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => Self::seeded(seed, config),
            None => Self::from_entropy(config),
        }
    }
}

fn normal(field: &str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() {
        return Err(SmartAgroError::invalid(
            &format!("{}_mean", field),
            "mean must be a finite number",
        ));
    }
    // Normal::new accepts a negative std_dev (it mirrors the curve), so check it here.
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(SmartAgroError::invalid(
            &format!("{}_std_dev", field),
            "standard deviation must be a finite, non-negative number",
        ));
    }
    Normal::new(mean, std_dev)
        .map_err(|e| SmartAgroError::invalid(&format!("{}_std_dev", field), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(seed: u64) -> ReadingSimulator {
        ReadingSimulator::seeded(seed, &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn current_readings_stay_in_range() {
        let mut sim = simulator(7);
        for _ in 0..2000 {
            let r = sim.current_reading();
            assert!((15..60).contains(&r.soil_moisture_percent));
            assert!((20..45).contains(&r.ambient_temp_c));
            assert!((20..90).contains(&r.battery_percent));
        }
    }

    #[test]
    fn rain_forecast_roughly_follows_weights() {
        let mut sim = simulator(11);
        let n = 10_000;
        let mut high = 0;
        let mut low = 0;
        let mut none = 0;
        for _ in 0..n {
            match sim.current_reading().rain_forecast {
                RainForecast::High => high += 1,
                RainForecast::Low => low += 1,
                RainForecast::None => none += 1,
            }
        }
        let frac = |c: i32| c as f64 / n as f64;
        assert!((frac(high) - 0.2).abs() < 0.03, "high = {}", frac(high));
        assert!((frac(low) - 0.4).abs() < 0.03, "low = {}", frac(low));
        assert!((frac(none) - 0.4).abs() < 0.03, "none = {}", frac(none));
    }

    #[test]
    fn same_seed_same_readings() {
        let mut a = simulator(42);
        let mut b = simulator(42);
        let now = Local::now();
        for _ in 0..10 {
            assert_eq!(a.current_reading(), b.current_reading());
        }
        assert_eq!(a.historical_series(now, 24), b.historical_series(now, 24));
    }

    #[test]
    fn history_has_requested_count_and_ends_now() {
        let mut sim = simulator(3);
        let now = Local::now();
        let series = sim.historical_series(now, 24);

        assert_eq!(series.len(), 24);
        assert_eq!(series.last_timestamp(), Some(now));
        assert_eq!(series.first_timestamp(), Some(now - Duration::hours(23)));
        for pair in series.points.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn history_values_clamped() {
        // Wide distributions force values onto the clamp bounds.
        let config = SimulationConfig {
            moisture_std_dev: 100.0,
            temp_std_dev: 100.0,
            ..SimulationConfig::default()
        };
        let mut sim = ReadingSimulator::seeded(5, &config).unwrap();
        let series = sim.historical_series(Local::now(), 500);

        let mut hit_bound = false;
        for p in &series.points {
            assert!((10.0..=70.0).contains(&p.moisture_percent));
            assert!((20.0..=45.0).contains(&p.temp_c));
            if p.moisture_percent == 10.0 || p.moisture_percent == 70.0 {
                hit_bound = true;
            }
        }
        assert!(hit_bound);
    }

    #[test]
    fn history_with_default_distribution_in_bounds() {
        let mut sim = simulator(9);
        let series = sim.historical_series(Local::now(), 168);
        assert_eq!(series.len(), 168);
        assert!(series
            .points
            .iter()
            .all(|p| (10.0..=70.0).contains(&p.moisture_percent)
                && (20.0..=45.0).contains(&p.temp_c)));
    }

    #[test]
    fn zero_std_dev_is_constant() {
        let config = SimulationConfig {
            moisture_std_dev: 0.0,
            ..SimulationConfig::default()
        };
        let mut sim = ReadingSimulator::seeded(4, &config).unwrap();
        let series = sim.historical_series(Local::now(), 5);
        assert!(series.points.iter().all(|p| p.moisture_percent == 40.0));
    }

    #[test]
    fn empty_history() {
        let mut sim = simulator(1);
        assert!(sim.historical_series(Local::now(), 0).is_empty());
    }

    #[test]
    fn rejects_invalid_distribution() {
        let config = SimulationConfig {
            temp_std_dev: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            ReadingSimulator::seeded(1, &config),
            Err(SmartAgroError::InvalidConfig { ref field, .. }) if field == "simulation.temp_std_dev"
        ));

        let config = SimulationConfig {
            moisture_std_dev: f64::INFINITY,
            ..SimulationConfig::default()
        };
        assert!(ReadingSimulator::from_config(&config).is_err());

        let config = SimulationConfig {
            moisture_mean: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(ReadingSimulator::seeded(1, &config).is_err());
    }
}
