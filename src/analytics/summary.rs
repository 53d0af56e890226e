use serde::{Deserialize, Serialize};

use crate::core::{ConfidenceBand, RrBucket};
use crate::models::{Session, Tag};

/// Win/loss and P&L for one value of a grouping dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats<K> {
    pub key: K,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
}

pub type SessionStats = GroupStats<Session>;
pub type StrategyStats = GroupStats<Tag>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionShare {
    pub emotion: Tag,
    pub count: usize,
    /// Percentage of closed trades logged with this emotion.
    pub share_pct: f64,
    pub wins: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrBucketCount {
    pub bucket: RrBucket,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeImpact {
    pub mistake: Tag,
    pub count: usize,
    /// Sum of the losses on trades carrying this tag. Zero or negative.
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceStats {
    pub band: ConfidenceBand,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// `YYYY-MM`
    pub month: String,
    pub profit: f64,
    pub loss: f64,
    pub trades: usize,
    /// Running P&L at the end of this month (balance curve).
    pub cumulative_pnl: f64,
}

/// Everything the dashboard and analytics screens show, derived from one
/// set of trades. Rebuilt from scratch on every query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub trade_count: usize,
    pub open_excluded: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_pnl: f64,
    pub win_rate: f64,

    /// Mean over trades with a measurable ratio; 0 when there are none.
    pub avg_rr: f64,
    pub rated_trades: usize,

    pub avg_win: f64,
    pub avg_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    /// `None` when there is no losing P&L to divide by.
    pub profit_factor: Option<f64>,

    pub sessions: Vec<SessionStats>,
    pub strategies: Vec<StrategyStats>,
    pub emotions: Vec<EmotionShare>,
    pub rr_distribution: Vec<RrBucketCount>,
    pub mistakes: Vec<MistakeImpact>,
    pub confidence: Vec<ConfidenceStats>,
    pub monthly: Vec<MonthlyStats>,
}

impl AggregateSummary {
    pub fn session(&self, session: Session) -> Option<&SessionStats> {
        self.sessions.iter().find(|s| s.key == session)
    }

    pub fn rr_count(&self, bucket: RrBucket) -> usize {
        self.rr_distribution
            .iter()
            .find(|b| b.bucket == bucket)
            .map_or(0, |b| b.count)
    }

    pub fn confidence_band(&self, band: ConfidenceBand) -> Option<&ConfidenceStats> {
        self.confidence.iter().find(|c| c.band == band)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(70));
        println!("  TRADING JOURNAL");
        println!("{}", "=".repeat(70));
        println!();
        println!("  PERFORMANCE");
        println!("  ───────────────────────────────────");
        println!("  Total P&L:   ${:+.2}", self.total_pnl);
        println!("  Trades:      {} closed ({} open skipped)", self.trade_count, self.open_excluded);
        println!("  Win/Loss:    {} / {}", self.wins, self.losses);
        println!("  Win Rate:    {:.1}%", self.win_rate);
        println!("  Avg R:R:     {:.2} ({} rated)", self.avg_rr, self.rated_trades);
        println!("  Avg Win:     ${:+.2}", self.avg_win);
        println!("  Avg Loss:    ${:+.2}", self.avg_loss);
        println!("  Best:        ${:+.2}", self.best_trade);
        println!("  Worst:       ${:+.2}", self.worst_trade);
        match self.profit_factor {
            Some(pf) => println!("  Profit Factor: {:.2}", pf),
            None => println!("  Profit Factor: n/a"),
        }

        if !self.sessions.is_empty() {
            println!();
            println!("  BY SESSION");
            println!("  ───────────────────────────────────");
            for s in &self.sessions {
                println!(
                    "  {:>8}: {} trades | WR {:.0}% | PnL ${:+.2}",
                    s.key, s.trades, s.win_rate, s.total_pnl
                );
            }
        }

        if !self.strategies.is_empty() {
            println!();
            println!("  BY STRATEGY");
            println!("  ───────────────────────────────────");
            for s in &self.strategies {
                println!(
                    "  {:>12}: {} trades | WR {:.0}% | PnL ${:+.2}",
                    s.key, s.trades, s.win_rate, s.total_pnl
                );
            }
        }

        if !self.rr_distribution.is_empty() {
            println!();
            println!("  R:R DISTRIBUTION");
            println!("  ───────────────────────────────────");
            for b in &self.rr_distribution {
                println!("  {:>7}: {}", b.bucket, b.count);
            }
        }

        if !self.emotions.is_empty() {
            println!();
            println!("  EMOTIONS");
            println!("  ───────────────────────────────────");
            for e in &self.emotions {
                println!(
                    "  {:>10}: {} ({:.0}%) | WR {:.0}% | PnL ${:+.2}",
                    e.emotion, e.count, e.share_pct, e.win_rate, e.total_pnl
                );
            }
        }

        if !self.confidence.is_empty() {
            println!();
            println!("  CONFIDENCE vs OUTCOME");
            println!("  ───────────────────────────────────");
            for c in &self.confidence {
                println!(
                    "  {:>5}: {} trades | WR {:.0}%",
                    c.band, c.trades, c.win_rate
                );
            }
        }

        if !self.mistakes.is_empty() {
            println!();
            println!("  MISTAKE IMPACT");
            println!("  ───────────────────────────────────");
            for m in &self.mistakes {
                println!("  {:>16}: {}x | ${:+.2}", m.mistake, m.count, m.impact);
            }
        }

        if !self.monthly.is_empty() {
            println!();
            println!("  MONTHLY");
            println!("  ───────────────────────────────────");
            for m in &self.monthly {
                println!(
                    "  {}: {} trades | +${:.2} / ${:.2} | balance ${:+.2}",
                    m.month, m.trades, m.profit, m.loss, m.cumulative_pnl
                );
            }
        }

        println!("{}", "=".repeat(70));
    }
}
