use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::risk_reward::{compute_risk_reward, RiskReward};
use crate::models::direction::Direction;
use crate::models::trade_record::TradeId;

pub const DEFAULT_CONFIDENCE: i64 = 5;

/// Raw, unvalidated trade-entry values.
///
/// A draft is never edited in place: every `with_*` call consumes it and
/// returns the next draft. Nothing is checked until the draft is submitted
/// to [`validate_trade_record`](crate::models::validate_trade_record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeDraft {
    pub(crate) id: Option<TradeId>,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) instrument: String,
    pub(crate) direction: String,
    pub(crate) lot_size: Option<f64>,
    pub(crate) entry_price: Option<f64>,
    pub(crate) exit_price: Option<f64>,
    pub(crate) stop_loss: Option<f64>,
    pub(crate) take_profit: Option<f64>,
    pub(crate) session: String,
    pub(crate) strategy: String,
    pub(crate) emotion: String,
    pub(crate) confidence: i64,
    pub(crate) pnl: Option<f64>,
    pub(crate) notes: String,
    pub(crate) mistakes: Vec<String>,
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self {
            id: None,
            date: None,
            instrument: String::new(),
            direction: String::new(),
            lot_size: None,
            entry_price: None,
            exit_price: None,
            stop_loss: None,
            take_profit: None,
            session: String::new(),
            strategy: String::new(),
            emotion: String::new(),
            confidence: DEFAULT_CONFIDENCE,
            pnl: None,
            notes: String::new(),
            mistakes: Vec::new(),
        }
    }
}

impl TradeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<TradeId> {
        self.id
    }

    pub fn with_id(self, id: TradeId) -> Self {
        Self { id: Some(id), ..self }
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    pub fn with_instrument(self, instrument: &str) -> Self {
        Self {
            instrument: instrument.to_string(),
            ..self
        }
    }

    pub fn with_direction(self, direction: &str) -> Self {
        Self {
            direction: direction.to_string(),
            ..self
        }
    }

    pub fn with_lot_size(self, lot_size: f64) -> Self {
        Self {
            lot_size: Some(lot_size),
            ..self
        }
    }

    pub fn with_entry_price(self, price: impl Into<Option<f64>>) -> Self {
        Self {
            entry_price: price.into(),
            ..self
        }
    }

    pub fn with_exit_price(self, price: impl Into<Option<f64>>) -> Self {
        Self {
            exit_price: price.into(),
            ..self
        }
    }

    pub fn with_stop_loss(self, price: impl Into<Option<f64>>) -> Self {
        Self {
            stop_loss: price.into(),
            ..self
        }
    }

    pub fn with_take_profit(self, price: impl Into<Option<f64>>) -> Self {
        Self {
            take_profit: price.into(),
            ..self
        }
    }

    pub fn with_session(self, session: &str) -> Self {
        Self {
            session: session.to_string(),
            ..self
        }
    }

    pub fn with_strategy(self, strategy: &str) -> Self {
        Self {
            strategy: strategy.to_string(),
            ..self
        }
    }

    pub fn with_emotion(self, emotion: &str) -> Self {
        Self {
            emotion: emotion.to_string(),
            ..self
        }
    }

    pub fn with_confidence(self, confidence: i64) -> Self {
        Self { confidence, ..self }
    }

    pub fn with_pnl(self, pnl: impl Into<Option<f64>>) -> Self {
        Self {
            pnl: pnl.into(),
            ..self
        }
    }

    pub fn with_notes(self, notes: &str) -> Self {
        Self {
            notes: notes.to_string(),
            ..self
        }
    }

    pub fn with_mistake(mut self, mistake: &str) -> Self {
        self.mistakes.push(mistake.to_string());
        self
    }

    /// Live calculator output for whatever is filled in so far.
    pub fn risk_reward_preview(&self) -> Option<RiskReward> {
        let direction = self.direction.parse::<Direction>().ok();
        compute_risk_reward(self.entry_price, self.stop_loss, self.take_profit, direction)
    }
}
