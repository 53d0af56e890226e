use anyhow::{Context, Result};
use std::fs;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::Config;
use trade_journal::core::RiskReward;
use trade_journal::models::TradeDraft;
use trade_journal::trading::Journal;

fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::new(Rfc3339))
        .init();

    // Optional first argument overrides JOURNAL_FILE
    if let Some(path) = std::env::args().nth(1) {
        cfg.journal_file = path;
    }

    let raw = fs::read_to_string(&cfg.journal_file)
        .with_context(|| format!("reading journal file {}", cfg.journal_file))?;
    let drafts: Vec<TradeDraft> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing journal file {}", cfg.journal_file))?;

    let journal = Journal::from_drafts(drafts)
        .with_context(|| format!("validating trades in {}", cfg.journal_file))?;
    info!("Loaded {} trades from {}", journal.len(), cfg.journal_file);

    let summary = journal.summary();
    if summary.trade_count == 0 {
        warn!("No closed trades to analyse");
    }
    summary.print_summary();

    let recent = journal.recent(cfg.recent_trades);
    if !recent.is_empty() {
        println!();
        println!("  RECENT TRADES");
        println!("  ───────────────────────────────────");
        for t in recent {
            println!(
                "  {} {} {:>7} {:>5} | R:R {} | {:>8} | ${:+.2}",
                t.date(),
                t.instrument(),
                t.direction(),
                t.session(),
                RiskReward::label(t.risk_reward()),
                t.emotion(),
                t.realized_pnl().unwrap_or_default()
            );
        }
    }

    Ok(())
}
