use crate::models::{HistoricalSeries, HistoryPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Min/max/average soil moisture over the series
pub fn moisture_stats(series: &HistoricalSeries) -> Option<SeriesStats> {
    stats(&series.points, |p| p.moisture_percent)
}

/// Min/max/average ambient temperature over the series
pub fn temperature_stats(series: &HistoricalSeries) -> Option<SeriesStats> {
    stats(&series.points, |p| p.temp_c)
}

/// Hours where soil moisture sat below the irrigation threshold
pub fn hours_below_moisture_threshold(series: &HistoricalSeries, threshold: u8) -> usize {
    series
        .points
        .iter()
        .filter(|p| p.moisture_percent < f64::from(threshold))
        .count()
}

/// Hours at or above the temperature alert line
pub fn hours_at_or_above_temp(series: &HistoricalSeries, max_temp_c: i32) -> usize {
    series
        .points
        .iter()
        .filter(|p| p.temp_c >= f64::from(max_temp_c))
        .count()
}

fn stats(points: &[HistoryPoint], value: impl Fn(&HistoryPoint) -> f64) -> Option<SeriesStats> {
    if points.is_empty() {
        return None;
    }

    let values: Vec<f64> = points.iter().map(value).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    Some(SeriesStats { min, max, avg })
}
