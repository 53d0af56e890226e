pub mod engine;
pub mod summary;

pub use engine::{aggregate, aggregate_drafts};
pub use summary::{
    AggregateSummary, ConfidenceStats, EmotionShare, GroupStats, MistakeImpact, MonthlyStats,
    RrBucketCount, SessionStats, StrategyStats,
};
