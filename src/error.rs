use thiserror::Error;

use crate::models::TradeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    Missing(&'static str),

    #[error("'{field}' must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("'{0}' is not a finite number")]
    NotFinite(&'static str),

    #[error("confidence must be within 1..=10, got {0}")]
    ConfidenceOutOfRange(i64),

    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("invalid {kind} tag '{value}'")]
    InvalidTag { kind: &'static str, value: String },

    #[error("trade {0} does not exist")]
    UnknownTrade(TradeId),

    #[error("trade id {0} is used more than once")]
    DuplicateId(TradeId),

    #[error("no trade ids left to hand out")]
    IdSpaceExhausted,

    #[error("trade {id}: {source}")]
    Record {
        id: TradeId,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("candidate at position {position}: {source}")]
    Candidate {
        position: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Attach the identifier of the record that failed.
    pub fn for_record(self, id: TradeId) -> Self {
        match self {
            ValidationError::Record { .. } => self,
            other => ValidationError::Record {
                id,
                source: Box::new(other),
            },
        }
    }

    /// Attach the batch position of a failing candidate that has no id.
    pub fn for_candidate(self, position: usize) -> Self {
        match self {
            ValidationError::Record { .. } | ValidationError::Candidate { .. } => self,
            other => ValidationError::Candidate {
                position,
                source: Box::new(other),
            },
        }
    }

    pub fn record_id(&self) -> Option<TradeId> {
        match self {
            ValidationError::Record { id, .. } => Some(*id),
            ValidationError::UnknownTrade(id) | ValidationError::DuplicateId(id) => Some(*id),
            _ => None,
        }
    }
}
