use chrono::NaiveDate;

use crate::models::{validate_trade_record, TradeDraft, TradeId, TradeRecord};

/// EUR/USD long, London, one lot: 1.0945 -> 1.0978 with SL 1.0920 / TP 1.0990.
pub fn closed_draft(id: u64) -> TradeDraft {
    TradeDraft::new()
        .with_id(TradeId(id))
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        .with_instrument("EURUSD")
        .with_direction("Long")
        .with_lot_size(1.0)
        .with_entry_price(1.0945)
        .with_exit_price(1.0978)
        .with_stop_loss(1.0920)
        .with_take_profit(1.0990)
        .with_session("London")
        .with_strategy("ICT")
        .with_emotion("Confident")
        .with_confidence(8)
        .with_pnl(330.0)
}

pub fn record(draft: TradeDraft) -> TradeRecord {
    validate_trade_record(&draft).unwrap()
}
