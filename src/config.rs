use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Input
    pub journal_file: String,

    // Dashboard
    pub recent_trades: usize,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal_file: "trades.json".to_string(),
            recent_trades: 5,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let mut cfg = Config::default();
        cfg.journal_file = env("JOURNAL_FILE", &cfg.journal_file);
        cfg.log_level = env("LOG_LEVEL", &cfg.log_level);
        if let Ok(raw) = std::env::var("RECENT_TRADES") {
            cfg.recent_trades = parse_recent(&raw, cfg.recent_trades);
        }

        cfg
    }
}

fn parse_recent(raw: &str, default: usize) -> usize {
    match raw.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            warn!("Ignoring RECENT_TRADES='{}', expected a count", raw);
            default
        }
    }
}
