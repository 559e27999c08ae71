use serde::{Serialize, Serializer};

pub const TEMPERATURE_ALERT_MESSAGE: &str =
    "High temperature alert: risk of heat stress in the crops.";

/// Which branch of the irrigation policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    MoistureSufficient,
    BatteryInsufficient,
    RainExpected,
    ConditionsFavorable,
}

impl DecisionReason {
    /// Fixed reason template. Display capitalizes it for rendering.
    pub fn message(&self) -> &'static str {
        match self {
            DecisionReason::MoistureSufficient => "moisture sufficient, irrigation not needed.",
            DecisionReason::BatteryInsufficient => "moisture low, but battery insufficient.",
            DecisionReason::RainExpected => "moisture low, but rain expected soon.",
            DecisionReason::ConditionsFavorable => {
                "moisture low, battery sufficient, and no rain expected."
            }
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = self.message().chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

impl Serialize for DecisionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IrrigationDecision {
    pub should_irrigate: bool,
    pub reason: DecisionReason,
}

impl IrrigationDecision {
    pub fn irrigate(reason: DecisionReason) -> Self {
        Self {
            should_irrigate: true,
            reason,
        }
    }

    pub fn hold(reason: DecisionReason) -> Self {
        Self {
            should_irrigate: false,
            reason,
        }
    }

    /// Headline shown before the reason, e.g. on the dashboard.
    pub fn headline(&self) -> &'static str {
        if self.should_irrigate {
            "Irrigation recommended."
        } else {
            "Wait before irrigating."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        let all = [
            DecisionReason::MoistureSufficient,
            DecisionReason::BatteryInsufficient,
            DecisionReason::RainExpected,
            DecisionReason::ConditionsFavorable,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
            assert_ne!(a.message(), TEMPERATURE_ALERT_MESSAGE);
        }
    }

    #[test]
    fn reason_serializes_as_message() {
        let decision = IrrigationDecision::hold(DecisionReason::RainExpected);
        let json = serde_json::to_value(decision).unwrap();
        assert_eq!(json["should_irrigate"], false);
        assert_eq!(json["reason"], "moisture low, but rain expected soon.");
    }

    #[test]
    fn display_capitalizes_template() {
        assert_eq!(
            DecisionReason::MoistureSufficient.message(),
            "moisture sufficient, irrigation not needed."
        );
        assert_eq!(
            DecisionReason::MoistureSufficient.to_string(),
            "Moisture sufficient, irrigation not needed."
        );
        assert_eq!(
            DecisionReason::ConditionsFavorable.to_string(),
            "Moisture low, battery sufficient, and no rain expected."
        );
    }

    #[test]
    fn headline_follows_decision() {
        assert!(IrrigationDecision::irrigate(DecisionReason::ConditionsFavorable)
            .headline()
            .contains("recommended"));
        assert!(IrrigationDecision::hold(DecisionReason::MoistureSufficient)
            .headline()
            .contains("Wait"));
    }
}
