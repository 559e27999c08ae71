pub mod engine;
pub mod heat_stress;
pub mod irrigation;

pub use engine::RulesEngine;

use crate::models::{Recommendation, SensorReading, ThresholdConfig};

/// Trait for field rules shown as recommendations on the dashboard
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(
        &self,
        reading: &SensorReading,
        thresholds: &ThresholdConfig,
    ) -> Option<Recommendation>;
}
