use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

use crate::analytics::summary::{
    AggregateSummary, ConfidenceStats, EmotionShare, GroupStats, MistakeImpact, MonthlyStats,
    RrBucketCount,
};
use crate::core::{rr_bucket, ConfidenceBand, RiskReward, RrBucket};
use crate::error::ValidationError;
use crate::models::{validate_trade_record, Tag, TradeDraft, TradeId, TradeRecord};

/// A closed trade paired with its realised P&L.
#[derive(Clone, Copy)]
struct Closed<'a> {
    record: &'a TradeRecord,
    pnl: f64,
}

impl Closed<'_> {
    fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Fold a set of trades into the dashboard/analytics view.
///
/// Open trades are skipped. Rankings are stable: equal metrics keep the
/// order in which their key first appeared in `trades`.
pub fn aggregate(trades: &[TradeRecord]) -> AggregateSummary {
    let closed: Vec<Closed<'_>> = trades
        .iter()
        .filter_map(|record| record.realized_pnl().map(|pnl| Closed { record, pnl }))
        .collect();
    let open_excluded = trades.len() - closed.len();

    debug!(
        "Aggregating {} closed trades ({} open excluded)",
        closed.len(),
        open_excluded
    );

    if closed.is_empty() {
        return AggregateSummary {
            open_excluded,
            ..AggregateSummary::default()
        };
    }

    let trade_count = closed.len();
    let win_pnls: Vec<f64> = closed.iter().filter(|c| c.is_win()).map(|c| c.pnl).collect();
    let loss_pnls: Vec<f64> = closed.iter().filter(|c| !c.is_win()).map(|c| c.pnl).collect();
    let wins = win_pnls.len();
    let losses = loss_pnls.len();

    let total_pnl: f64 = closed.iter().map(|c| c.pnl).sum();
    let gross_profit: f64 = win_pnls.iter().sum();
    let gross_loss: f64 = loss_pnls.iter().sum();

    let ratios: Vec<RiskReward> = closed.iter().filter_map(|c| c.record.risk_reward()).collect();
    let rated_trades = ratios.len();
    let avg_rr = mean(ratios.iter().map(|r| r.value()), rated_trades);

    let profit_factor = (gross_loss < 0.0).then(|| gross_profit / gross_loss.abs());

    AggregateSummary {
        trade_count,
        open_excluded,
        wins,
        losses,
        total_pnl,
        win_rate: win_rate(wins, trade_count),
        avg_rr,
        rated_trades,
        avg_win: mean(win_pnls.iter().copied(), wins),
        avg_loss: mean(loss_pnls.iter().copied(), losses),
        best_trade: closed.iter().map(|c| c.pnl).fold(f64::NEG_INFINITY, f64::max),
        worst_trade: closed.iter().map(|c| c.pnl).fold(f64::INFINITY, f64::min),
        profit_factor,
        sessions: group_stats(&closed, |c| c.record.session()),
        strategies: group_stats(&closed, |c| c.record.strategy().clone()),
        emotions: emotion_distribution(&closed),
        rr_distribution: rr_distribution(&ratios),
        mistakes: mistake_impact(&closed),
        confidence: confidence_stats(&closed),
        monthly: monthly_stats(&closed),
    }
}

/// Validate a batch of candidate records, then aggregate them.
///
/// Fails on the first candidate that breaks a rule, naming its id (or its
/// position in `drafts` when it has none), or on a repeated id.
pub fn aggregate_drafts(drafts: &[TradeDraft]) -> Result<AggregateSummary, ValidationError> {
    let mut seen: HashSet<TradeId> = HashSet::new();
    let mut records = Vec::with_capacity(drafts.len());
    for (position, draft) in drafts.iter().enumerate() {
        let record = match draft.id() {
            Some(id) => {
                if !seen.insert(id) {
                    return Err(ValidationError::DuplicateId(id));
                }
                validate_trade_record(draft).map_err(|e| e.for_record(id))?
            }
            None => validate_trade_record(draft).map_err(|e| e.for_candidate(position))?,
        };
        records.push(record);
    }
    Ok(aggregate(&records))
}

fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

/// Group closed trades by `key`, keeping groups in first-seen order.
fn grouped<'a, K, F>(closed: &[Closed<'a>], key: F) -> Vec<(K, Vec<Closed<'a>>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Closed<'a>) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<Closed<'a>>)> = Vec::new();
    for c in closed {
        let k = key(c);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(*c),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![*c]));
            }
        }
    }
    groups
}

fn group_stats<'a, K, F>(closed: &[Closed<'a>], key: F) -> Vec<GroupStats<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&Closed<'a>) -> K,
{
    let mut out: Vec<GroupStats<K>> = grouped(closed, key)
        .into_iter()
        .map(|(key, trades)| {
            let wins = trades.iter().filter(|c| c.is_win()).count();
            GroupStats {
                key,
                trades: trades.len(),
                wins,
                losses: trades.len() - wins,
                win_rate: win_rate(wins, trades.len()),
                total_pnl: trades.iter().map(|c| c.pnl).sum(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.total_pnl.total_cmp(&a.total_pnl));
    out
}

fn emotion_distribution(closed: &[Closed<'_>]) -> Vec<EmotionShare> {
    let total = closed.len();
    let mut out: Vec<EmotionShare> = grouped(closed, |c| c.record.emotion().clone())
        .into_iter()
        .map(|(emotion, trades)| {
            let wins = trades.iter().filter(|c| c.is_win()).count();
            EmotionShare {
                emotion,
                count: trades.len(),
                share_pct: trades.len() as f64 / total as f64 * 100.0,
                wins,
                win_rate: win_rate(wins, trades.len()),
                total_pnl: trades.iter().map(|c| c.pnl).sum(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn rr_distribution(ratios: &[RiskReward]) -> Vec<RrBucketCount> {
    if ratios.is_empty() {
        return Vec::new();
    }
    RrBucket::RANGES
        .into_iter()
        .map(|bucket| RrBucketCount {
            bucket,
            count: ratios.iter().filter(|r| rr_bucket(Some(**r)) == bucket).count(),
        })
        .collect()
}

fn mistake_impact(closed: &[Closed<'_>]) -> Vec<MistakeImpact> {
    let mut order: Vec<Tag> = Vec::new();
    let mut stats: HashMap<Tag, (usize, f64)> = HashMap::new();
    for c in closed {
        for tag in c.record.mistakes() {
            let entry = stats.entry(tag.clone()).or_insert_with(|| {
                order.push(tag.clone());
                (0, 0.0)
            });
            entry.0 += 1;
            if c.pnl < 0.0 {
                entry.1 += c.pnl;
            }
        }
    }

    let mut out: Vec<MistakeImpact> = order
        .into_iter()
        .map(|mistake| {
            let (count, impact) = stats[&mistake];
            MistakeImpact {
                mistake,
                count,
                impact,
            }
        })
        .collect();
    // Most damaging first.
    out.sort_by(|a, b| a.impact.total_cmp(&b.impact));
    out
}

fn confidence_stats(closed: &[Closed<'_>]) -> Vec<ConfidenceStats> {
    ConfidenceBand::ALL
        .into_iter()
        .map(|band| {
            let in_band: Vec<&Closed<'_>> = closed
                .iter()
                .filter(|c| c.record.confidence().band() == band)
                .collect();
            let wins = in_band.iter().filter(|c| c.is_win()).count();
            ConfidenceStats {
                band,
                trades: in_band.len(),
                wins,
                win_rate: win_rate(wins, in_band.len()),
            }
        })
        .collect()
}

fn monthly_stats(closed: &[Closed<'_>]) -> Vec<MonthlyStats> {
    let mut months: BTreeMap<String, MonthlyStats> = BTreeMap::new();
    for c in closed {
        let month = c.record.date().format("%Y-%m").to_string();
        let entry = months.entry(month.clone()).or_insert_with(|| MonthlyStats {
            month,
            profit: 0.0,
            loss: 0.0,
            trades: 0,
            cumulative_pnl: 0.0,
        });
        entry.trades += 1;
        if c.pnl > 0.0 {
            entry.profit += c.pnl;
        } else {
            entry.loss += c.pnl;
        }
    }

    let mut balance = 0.0;
    months
        .into_values()
        .map(|mut m| {
            balance += m.profit + m.loss;
            m.cumulative_pnl = balance;
            m
        })
        .collect()
}
