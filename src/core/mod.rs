pub mod classify;
pub mod risk_reward;

pub use classify::{classify_outcome, confidence_band, is_win, rr_bucket, ConfidenceBand, RrBucket};
pub use risk_reward::{compute_risk_reward, RiskReward};
