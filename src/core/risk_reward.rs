use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::models::Direction;

/// A measured reward/risk ratio, rounded to two decimals and never negative.
///
/// There is no "undefined" value of this type: a ratio that cannot be
/// measured is `None` at every call site, so it cannot leak into averages.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskReward(f64);

impl TryFrom<f64> for RiskReward {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite("riskReward"));
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                field: "riskReward",
                value,
            });
        }
        Ok(RiskReward(round2(value)))
    }
}

impl From<RiskReward> for f64 {
    fn from(r: RiskReward) -> f64 {
        r.0
    }
}

impl RiskReward {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Badge text for the entry form, e.g. `1:2.00`. Unmeasurable ratios
    /// render as `1:0.00`.
    pub fn label(ratio: Option<RiskReward>) -> String {
        format!("1:{}", Self::display(ratio))
    }

    pub fn display(ratio: Option<RiskReward>) -> String {
        format!("{:.2}", ratio.map_or(0.0, |r| r.0))
    }
}

impl fmt::Display for RiskReward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Reward distance over risk distance for a planned trade.
///
/// Returns `None` when any input is missing or non-finite, or when the stop
/// sits on the entry (zero risk).
pub fn compute_risk_reward(
    entry_price: Option<f64>,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    direction: Option<Direction>,
) -> Option<RiskReward> {
    let entry = finite(entry_price)?;
    let sl = finite(stop_loss)?;
    let tp = finite(take_profit)?;

    let (risk, reward) = match direction? {
        Direction::Long => ((entry - sl).abs(), (tp - entry).abs()),
        Direction::Short => ((sl - entry).abs(), (entry - tp).abs()),
    };

    if risk <= 0.0 {
        return None;
    }

    let ratio = round2(reward / risk);
    ratio.is_finite().then_some(RiskReward(ratio))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_two_to_one() {
        let rr = compute_risk_reward(Some(1.0), Some(0.995), Some(1.01), Some(Direction::Long));
        assert_eq!(rr.map(|r| r.value()), Some(2.0));
    }

    #[test]
    fn short_two_to_one() {
        let rr = compute_risk_reward(Some(1.0), Some(1.005), Some(0.99), Some(Direction::Short));
        assert_eq!(rr.map(|r| r.value()), Some(2.0));
    }

    #[test]
    fn stop_at_entry_is_undefined_for_both_directions() {
        for dir in [Direction::Long, Direction::Short] {
            assert!(compute_risk_reward(Some(1.2), Some(1.2), Some(1.3), Some(dir)).is_none());
        }
    }

    #[test]
    fn missing_or_nan_inputs_are_undefined() {
        assert!(compute_risk_reward(None, Some(1.0), Some(1.1), Some(Direction::Long)).is_none());
        assert!(compute_risk_reward(Some(1.0), Some(0.9), None, Some(Direction::Long)).is_none());
        assert!(compute_risk_reward(Some(1.0), Some(0.9), Some(1.1), None).is_none());
        assert!(
            compute_risk_reward(Some(f64::NAN), Some(0.9), Some(1.1), Some(Direction::Long))
                .is_none()
        );
    }

    #[test]
    fn target_at_entry_is_a_real_zero() {
        let rr = compute_risk_reward(Some(1.0), Some(0.99), Some(1.0), Some(Direction::Long));
        assert_eq!(rr, Some(RiskReward(0.0)));
    }

    #[test]
    fn rounds_to_two_decimals() {
        // reward 0.0033 / risk 0.0025 = 1.32
        let rr = compute_risk_reward(
            Some(1.0945),
            Some(1.0920),
            Some(1.0978),
            Some(Direction::Long),
        )
        .unwrap();
        assert_eq!(rr.value(), 1.32);
    }

    #[test]
    fn ratio_from_json_must_be_non_negative() {
        let err = serde_json::from_str::<RiskReward>("-1.5").unwrap_err();
        assert!(
            err.to_string().starts_with("'riskReward' must not be negative"),
            "{err}"
        );
        let rr: RiskReward = serde_json::from_str("1.987").unwrap();
        assert_eq!(rr.value(), 1.99);
        assert_eq!(serde_json::to_string(&rr).unwrap(), "1.99");
    }

    #[test]
    fn labels_match_entry_badge() {
        let rr = compute_risk_reward(Some(1.0), Some(0.995), Some(1.01), Some(Direction::Long));
        assert_eq!(RiskReward::label(rr), "1:2.00");
        assert_eq!(RiskReward::label(None), "1:0.00");
    }
}
