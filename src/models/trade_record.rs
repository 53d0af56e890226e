use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::core::classify::ConfidenceBand;
use crate::core::risk_reward::{compute_risk_reward, RiskReward};
use crate::error::ValidationError;
use crate::models::direction::{Direction, Session};
use crate::models::draft::TradeDraft;
use crate::models::instrument::{Instrument, PIP_VALUE_PER_LOT};
use crate::models::tags::{parse_mistakes, Tag};

// Supplied and derived P&L closer than this are treated as agreeing.
const PNL_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Self-rated confidence, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl TryFrom<i64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Confidence::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> u8 {
        c.0
    }
}

impl Confidence {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (1..=10).contains(&value) {
            Ok(Confidence(value as u8))
        } else {
            Err(ValidationError::ConfidenceOutOfRange(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(*self)
    }
}

/// A validated journal entry. Only built by [`validate_trade_record`];
/// changes go through [`TradeRecord::to_draft`] and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TradeDraft", into = "TradeDraft")]
pub struct TradeRecord {
    id: TradeId,
    date: NaiveDate,
    instrument: Instrument,
    direction: Direction,
    lot_size: f64,
    entry_price: f64,
    exit_price: Option<f64>,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    session: Session,
    strategy: Tag,
    emotion: Tag,
    confidence: Confidence,
    pnl: Option<f64>,
    notes: Option<String>,
    mistakes: Vec<Tag>,
}

impl TradeRecord {
    pub fn id(&self) -> TradeId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn lot_size(&self) -> f64 {
        self.lot_size
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn exit_price(&self) -> Option<f64> {
        self.exit_price
    }

    pub fn stop_loss(&self) -> Option<f64> {
        self.stop_loss
    }

    pub fn take_profit(&self) -> Option<f64> {
        self.take_profit
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn strategy(&self) -> &Tag {
        &self.strategy
    }

    pub fn emotion(&self) -> &Tag {
        &self.emotion
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn mistakes(&self) -> &[Tag] {
        &self.mistakes
    }

    /// The P&L value as entered, if any.
    pub fn supplied_pnl(&self) -> Option<f64> {
        self.pnl
    }

    pub fn is_closed(&self) -> bool {
        self.exit_price.is_some()
    }

    /// P&L computed from the price move, lot size and pip value.
    pub fn derived_pnl(&self) -> Option<f64> {
        let exit = self.exit_price?;
        let gain = (exit - self.entry_price) * self.direction.sign();
        Some(self.instrument.pips(gain) * PIP_VALUE_PER_LOT * self.lot_size)
    }

    /// Realised P&L of a closed trade. A supplied value always wins over
    /// the derived one; open trades have none.
    pub fn realized_pnl(&self) -> Option<f64> {
        if !self.is_closed() {
            return None;
        }
        self.pnl.or_else(|| self.derived_pnl())
    }

    pub fn risk_reward(&self) -> Option<RiskReward> {
        compute_risk_reward(
            Some(self.entry_price),
            self.stop_loss,
            self.take_profit,
            Some(self.direction),
        )
    }

    pub fn to_draft(&self) -> TradeDraft {
        TradeDraft {
            id: Some(self.id),
            date: Some(self.date),
            instrument: self.instrument.symbol().to_string(),
            direction: self.direction.as_str().to_string(),
            lot_size: Some(self.lot_size),
            entry_price: Some(self.entry_price),
            exit_price: self.exit_price,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            session: self.session.as_str().to_string(),
            strategy: self.strategy.to_string(),
            emotion: self.emotion.to_string(),
            confidence: i64::from(self.confidence.value()),
            pnl: self.pnl,
            notes: self.notes.clone().unwrap_or_default(),
            mistakes: self.mistakes.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Run the record back through validation. Always yields an equal record.
    pub fn revalidate(&self) -> Result<TradeRecord, ValidationError> {
        validate_trade_record(&self.to_draft())
    }
}

impl TryFrom<TradeDraft> for TradeRecord {
    type Error = ValidationError;

    fn try_from(draft: TradeDraft) -> Result<Self, Self::Error> {
        validate_trade_record(&draft)
    }
}

impl From<TradeRecord> for TradeDraft {
    fn from(record: TradeRecord) -> Self {
        record.to_draft()
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing(field))
}

fn required_str<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(value)
    }
}

fn positive(value: f64, field: &'static str) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

fn positive_opt(value: Option<f64>, field: &'static str) -> Result<Option<f64>, ValidationError> {
    value.map(|v| positive(v, field)).transpose()
}

/// Turn a submitted draft into a record, or report the first rule it breaks.
pub fn validate_trade_record(draft: &TradeDraft) -> Result<TradeRecord, ValidationError> {
    let id = required(draft.id, "id")?;
    let date = required(draft.date, "date")?;
    let instrument = required_str(&draft.instrument, "instrument")?.parse::<Instrument>()?;
    let direction = required_str(&draft.direction, "direction")?.parse::<Direction>()?;
    let session = required_str(&draft.session, "session")?.parse::<Session>()?;

    let lot_size = positive(required(draft.lot_size, "lotSize")?, "lotSize")?;
    let entry_price = positive(required(draft.entry_price, "entryPrice")?, "entryPrice")?;
    let exit_price = positive_opt(draft.exit_price, "exitPrice")?;
    let stop_loss = positive_opt(draft.stop_loss, "stopLoss")?;
    let take_profit = positive_opt(draft.take_profit, "takeProfit")?;

    let strategy = Tag::parse("strategy", &draft.strategy)?;
    let emotion = Tag::parse("emotion", &draft.emotion)?;
    let confidence = Confidence::new(draft.confidence)?;

    let pnl = match draft.pnl {
        Some(p) if !p.is_finite() => return Err(ValidationError::NotFinite("pnl")),
        other => other,
    };
    let notes = if draft.notes.trim().is_empty() {
        None
    } else {
        Some(draft.notes.clone())
    };
    let mistakes = parse_mistakes(&draft.mistakes)?;

    let record = TradeRecord {
        id,
        date,
        instrument,
        direction,
        lot_size,
        entry_price,
        exit_price,
        stop_loss,
        take_profit,
        session,
        strategy,
        emotion,
        confidence,
        pnl,
        notes,
        mistakes,
    };

    if let (Some(supplied), Some(derived)) = (record.pnl, record.derived_pnl()) {
        if (supplied - derived).abs() > PNL_TOLERANCE {
            debug!(
                "Trade {}: supplied pnl {:.2} differs from derived {:.2}, keeping supplied",
                id, supplied, derived
            );
        }
    }

    Ok(record)
}
