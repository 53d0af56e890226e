pub mod analytics;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
#[cfg(test)]
pub mod test_helpers;
pub mod trading;

pub use analytics::{aggregate, aggregate_drafts, AggregateSummary};
pub use self::core::{
    classify_outcome, compute_risk_reward, confidence_band, rr_bucket, RiskReward, RrBucket,
};
pub use error::ValidationError;
pub use models::{validate_trade_record, TradeDraft, TradeRecord};
