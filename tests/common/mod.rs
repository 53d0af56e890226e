use chrono::NaiveDate;
use trade_journal::models::{validate_trade_record, TradeDraft, TradeId, TradeRecord};

/// Closed trade with the given outcome; price levels give a 1.32 R:R.
pub fn trade(id: u64, pnl: f64, session: &str, confidence: i64) -> TradeDraft {
    TradeDraft::new()
        .with_id(TradeId(id))
        .with_date(NaiveDate::from_ymd_opt(2024, 6, id as u32 % 28 + 1).unwrap())
        .with_instrument("EUR/USD")
        .with_direction("Long")
        .with_lot_size(1.0)
        .with_entry_price(1.0945)
        .with_exit_price(1.0978)
        .with_stop_loss(1.0920)
        .with_take_profit(1.0978)
        .with_session(session)
        .with_strategy("ICT")
        .with_emotion("Focused")
        .with_confidence(confidence)
        .with_pnl(pnl)
}

pub fn validated(drafts: &[TradeDraft]) -> Vec<TradeRecord> {
    drafts
        .iter()
        .map(|d| validate_trade_record(d).unwrap())
        .collect()
}

/// The five trades shown on the dashboard's recent-trades table.
pub const DASHBOARD_JSON: &str = r#"[
  {"id": 1, "date": "2024-06-03", "instrument": "EUR/USD", "direction": "Long",
   "lotSize": 1.0, "entryPrice": 1.0945, "exitPrice": 1.0978, "stopLoss": 1.0920, "takeProfit": 1.0990,
   "session": "London", "strategy": "ICT", "emotion": "Confident", "confidence": 8},
  {"id": 2, "date": "2024-06-04", "instrument": "GBP/JPY", "direction": "Short",
   "lotSize": 1.0, "entryPrice": 184.45, "exitPrice": 183.89, "stopLoss": 184.75, "takeProfit": 183.85,
   "session": "Asian", "strategy": "SMC", "emotion": "Focused", "confidence": 9},
  {"id": 3, "date": "2024-06-05", "instrument": "USD/CAD", "direction": "Long",
   "lotSize": 0.5, "entryPrice": 1.3420, "exitPrice": 1.3385, "stopLoss": 1.3385, "takeProfit": 1.3490,
   "session": "NY", "strategy": "Breakout", "emotion": "Rushed", "confidence": 3,
   "mistakes": ["FOMO Entry"]},
  {"id": 4, "date": "2024-06-06", "instrument": "AUD/USD", "direction": "Short",
   "lotSize": 0.5, "entryPrice": 0.6789, "exitPrice": 0.6812, "stopLoss": 0.6812, "takeProfit": 0.6789,
   "session": "Asian", "strategy": "Scalping", "emotion": "Uncertain", "confidence": 4,
   "pnl": -115.0, "mistakes": ["Early Exit", "FOMO Entry"]},
  {"id": 5, "date": "2024-06-07", "instrument": "EUR/GBP", "direction": "Long",
   "lotSize": 1.0, "entryPrice": 0.8567, "exitPrice": 0.8598, "stopLoss": 0.8550, "takeProfit": 0.8600,
   "session": "London", "strategy": "ICT", "emotion": "Confident", "confidence": 7,
   "notes": "Clean retest of the order block"}
]"#;
