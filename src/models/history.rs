use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Local>,
    pub moisture_percent: f64,
    pub temp_c: f64,
}

/// Hourly readings for a plot, oldest first. The last point is the capture time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub points: Vec<HistoryPoint>,
}

impl HistoricalSeries {
    pub fn new(points: Vec<HistoryPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Local>> {
        self.points.first().map(|p| p.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Local>> {
        self.points.last().map(|p| p.timestamp)
    }

    /// Chart coordinates: x is hours relative to the last point (…, -2, -1, 0).
    pub fn moisture_points(&self) -> Vec<(f64, f64)> {
        self.chart_points(|p| p.moisture_percent)
    }

    pub fn temperature_points(&self) -> Vec<(f64, f64)> {
        self.chart_points(|p| p.temp_c)
    }

    fn chart_points(&self, value: impl Fn(&HistoryPoint) -> f64) -> Vec<(f64, f64)> {
        let offset = self.points.len().saturating_sub(1) as f64;
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64 - offset, value(p)))
            .collect()
    }
}
