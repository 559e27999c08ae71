pub mod chart;
pub mod gauge;
pub mod metric;

pub use chart::ThresholdChart;
pub use gauge::{battery_gauge, moisture_gauge, temperature_gauge};
pub use metric::MetricWidget;
