use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::risk_reward::RiskReward;
use crate::error::ValidationError;
use crate::models::{Confidence, Outcome, TradeRecord};

pub fn is_win(trade: &TradeRecord) -> bool {
    trade.realized_pnl().is_some_and(|p| p > 0.0)
}

/// Win or loss for a closed trade; `None` while the trade is open.
/// Break-even counts as a loss.
pub fn classify_outcome(trade: &TradeRecord) -> Option<Outcome> {
    trade
        .realized_pnl()
        .map(|p| if p > 0.0 { Outcome::Win } else { Outcome::Loss })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RrBucket {
    #[serde(rename = "0-0.5")]
    UnderHalf,
    #[serde(rename = "0.5-1")]
    HalfToOne,
    #[serde(rename = "1-1.5")]
    OneToOneHalf,
    #[serde(rename = "1.5-2")]
    OneHalfToTwo,
    #[serde(rename = "2-3")]
    TwoToThree,
    #[serde(rename = "3+")]
    ThreePlus,
    #[serde(rename = "unclassified")]
    Unclassified,
}

impl RrBucket {
    /// The six measurable buckets, lowest first.
    pub const RANGES: [RrBucket; 6] = [
        RrBucket::UnderHalf,
        RrBucket::HalfToOne,
        RrBucket::OneToOneHalf,
        RrBucket::OneHalfToTwo,
        RrBucket::TwoToThree,
        RrBucket::ThreePlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RrBucket::UnderHalf => "0-0.5",
            RrBucket::HalfToOne => "0.5-1",
            RrBucket::OneToOneHalf => "1-1.5",
            RrBucket::OneHalfToTwo => "1.5-2",
            RrBucket::TwoToThree => "2-3",
            RrBucket::ThreePlus => "3+",
            RrBucket::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for RrBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Place a ratio in its left-closed bucket.
pub fn rr_bucket(ratio: Option<RiskReward>) -> RrBucket {
    let Some(r) = ratio else {
        return RrBucket::Unclassified;
    };
    match r.value() {
        v if v < 0.5 => RrBucket::UnderHalf,
        v if v < 1.0 => RrBucket::HalfToOne,
        v if v < 1.5 => RrBucket::OneToOneHalf,
        v if v < 2.0 => RrBucket::OneHalfToTwo,
        v if v < 3.0 => RrBucket::TwoToThree,
        _ => RrBucket::ThreePlus,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceBand {
    #[serde(rename = "1-2")]
    VeryLow,
    #[serde(rename = "3-4")]
    Low,
    #[serde(rename = "5-6")]
    Medium,
    #[serde(rename = "7-8")]
    High,
    #[serde(rename = "9-10")]
    VeryHigh,
}

impl ConfidenceBand {
    pub const ALL: [ConfidenceBand; 5] = [
        ConfidenceBand::VeryLow,
        ConfidenceBand::Low,
        ConfidenceBand::Medium,
        ConfidenceBand::High,
        ConfidenceBand::VeryHigh,
    ];

    pub fn of(confidence: Confidence) -> Self {
        match confidence.value() {
            1 | 2 => ConfidenceBand::VeryLow,
            3 | 4 => ConfidenceBand::Low,
            5 | 6 => ConfidenceBand::Medium,
            7 | 8 => ConfidenceBand::High,
            // 9 or 10; Confidence never holds anything else
            _ => ConfidenceBand::VeryHigh,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::VeryLow => "1-2",
            ConfidenceBand::Low => "3-4",
            ConfidenceBand::Medium => "5-6",
            ConfidenceBand::High => "7-8",
            ConfidenceBand::VeryHigh => "9-10",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

pub fn confidence_band(confidence: i64) -> Result<ConfidenceBand, ValidationError> {
    Confidence::new(confidence).map(ConfidenceBand::of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::risk_reward::compute_risk_reward;
    use crate::models::{validate_trade_record, Direction};
    use crate::test_helpers::closed_draft;

    fn ratio(entry: f64, sl: f64, tp: f64) -> Option<RiskReward> {
        compute_risk_reward(Some(entry), Some(sl), Some(tp), Some(Direction::Long))
    }

    #[test]
    fn bucket_boundaries_are_left_closed() {
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.015)), RrBucket::OneHalfToTwo);
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.01)), RrBucket::OneToOneHalf);
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.005)), RrBucket::HalfToOne);
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.02)), RrBucket::TwoToThree);
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.03)), RrBucket::ThreePlus);
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.0)), RrBucket::UnderHalf);
    }

    #[test]
    fn just_below_boundary_stays_low() {
        // 1.49
        assert_eq!(rr_bucket(ratio(1.0, 0.99, 1.0149)), RrBucket::OneToOneHalf);
    }

    #[test]
    fn undefined_ratio_is_unclassified() {
        assert_eq!(rr_bucket(None), RrBucket::Unclassified);
    }

    #[test]
    fn bands_cover_one_to_ten() {
        let expected = [
            (1, "1-2"),
            (2, "1-2"),
            (3, "3-4"),
            (4, "3-4"),
            (5, "5-6"),
            (6, "5-6"),
            (7, "7-8"),
            (8, "7-8"),
            (9, "9-10"),
            (10, "9-10"),
        ];
        for (c, label) in expected {
            assert_eq!(confidence_band(c).unwrap().label(), label, "confidence {c}");
        }
    }

    #[test]
    fn band_outside_domain_fails() {
        assert_eq!(
            confidence_band(0).unwrap_err(),
            ValidationError::ConfidenceOutOfRange(0)
        );
        assert!(confidence_band(11).is_err());
    }

    #[test]
    fn outcome_follows_pnl_sign() {
        let win = validate_trade_record(&closed_draft(1)).unwrap();
        assert!(is_win(&win));
        assert_eq!(classify_outcome(&win), Some(Outcome::Win));

        let flat = validate_trade_record(&closed_draft(2).with_pnl(0.0)).unwrap();
        assert!(!is_win(&flat));
        assert_eq!(classify_outcome(&flat), Some(Outcome::Loss));

        let open = validate_trade_record(&closed_draft(3).with_exit_price(None)).unwrap();
        assert_eq!(classify_outcome(&open), None);
    }
}
