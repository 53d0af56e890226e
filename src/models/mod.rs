pub mod direction;
pub mod draft;
pub mod instrument;
pub mod tags;
pub mod trade_record;

pub use direction::{Direction, Outcome, Session};
pub use draft::TradeDraft;
pub use instrument::Instrument;
pub use tags::Tag;
pub use trade_record::{validate_trade_record, Confidence, TradeId, TradeRecord};
