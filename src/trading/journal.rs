use std::collections::HashSet;
use tracing::{debug, info};

use crate::analytics::{aggregate, AggregateSummary};
use crate::error::ValidationError;
use crate::models::{validate_trade_record, TradeDraft, TradeId, TradeRecord};

/// In-memory trade history in insertion order.
///
/// Ids are handed out monotonically and are never reused, even after the
/// trade that held one is removed.
#[derive(Debug, Clone)]
pub struct Journal {
    records: Vec<TradeRecord>,
    // None once u64::MAX has been used.
    next_id: Option<u64>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Build a journal from stored drafts. Drafts that carry an id keep it;
    /// the rest are numbered after the highest stored id.
    pub fn from_drafts(drafts: Vec<TradeDraft>) -> Result<Self, ValidationError> {
        let max_id = drafts.iter().filter_map(|d| d.id()).map(|id| id.0).max();
        let mut journal = Self {
            records: Vec::with_capacity(drafts.len()),
            next_id: max_id.map_or(Some(1), |m| m.checked_add(1)),
        };

        let mut seen: HashSet<TradeId> = HashSet::new();
        for draft in drafts {
            match draft.id() {
                Some(id) => {
                    if !seen.insert(id) {
                        return Err(ValidationError::DuplicateId(id));
                    }
                    let record = validate_trade_record(&draft).map_err(|e| e.for_record(id))?;
                    journal.records.push(record);
                }
                None => {
                    journal.add(draft)?;
                }
            }
        }

        debug!("Loaded {} trades, next id {:?}", journal.len(), journal.next_id);
        Ok(journal)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn get(&self, id: TradeId) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Validate a submitted draft and append it under a fresh id.
    /// Any id already on the draft is ignored.
    pub fn add(&mut self, draft: TradeDraft) -> Result<TradeId, ValidationError> {
        let id = TradeId(self.next_id.ok_or(ValidationError::IdSpaceExhausted)?);
        let record = validate_trade_record(&draft.with_id(id)).map_err(|e| e.for_record(id))?;
        info!(
            "Recorded trade {} ({} {})",
            id,
            record.instrument(),
            record.direction()
        );
        self.next_id = id.0.checked_add(1);
        self.records.push(record);
        Ok(id)
    }

    /// Swap the record stored under `id` for a validated edit, keeping its
    /// id and position.
    pub fn replace(&mut self, id: TradeId, draft: TradeDraft) -> Result<(), ValidationError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ValidationError::UnknownTrade(id))?;
        let record = validate_trade_record(&draft.with_id(id)).map_err(|e| e.for_record(id))?;
        self.records[pos] = record;
        info!("Edited trade {}", id);
        Ok(())
    }

    pub fn remove(&mut self, id: TradeId) -> Option<TradeRecord> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        info!("Removed trade {}", id);
        Some(self.records.remove(pos))
    }

    pub fn summary(&self) -> AggregateSummary {
        aggregate(&self.records)
    }

    /// The `n` most recent closed trades, newest date first. Trades on the
    /// same date come out latest-entered first.
    pub fn recent(&self, n: usize) -> Vec<&TradeRecord> {
        let mut closed: Vec<&TradeRecord> =
            self.records.iter().rev().filter(|r| r.is_closed()).collect();
        closed.sort_by(|a, b| b.date().cmp(&a.date()));
        closed.truncate(n);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::closed_draft;
    use chrono::NaiveDate;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut j = Journal::new();
        let a = j.add(closed_draft(0)).unwrap();
        let b = j.add(closed_draft(0)).unwrap();
        assert_eq!((a, b), (TradeId(1), TradeId(2)));

        j.remove(b).unwrap();
        let c = j.add(closed_draft(0)).unwrap();
        assert_eq!(c, TradeId(3));
    }

    #[test]
    fn failed_add_leaves_journal_untouched() {
        let mut j = Journal::new();
        let err = j.add(closed_draft(0).with_confidence(42)).unwrap_err();
        assert_eq!(err.record_id(), Some(TradeId(1)));
        assert!(j.is_empty());
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut j = Journal::new();
        let a = j.add(closed_draft(0)).unwrap();
        let b = j.add(closed_draft(0)).unwrap();

        let edit = j.get(a).unwrap().to_draft().with_pnl(-40.0);
        j.replace(a, edit).unwrap();

        assert_eq!(j.records()[0].id(), a);
        assert_eq!(j.records()[0].realized_pnl(), Some(-40.0));
        assert_eq!(j.records()[1].id(), b);
    }

    #[test]
    fn invalid_edit_keeps_old_record() {
        let mut j = Journal::new();
        let a = j.add(closed_draft(0)).unwrap();
        let before = j.get(a).unwrap().clone();
        let err = j.replace(a, before.to_draft().with_session("Mars")).unwrap_err();
        assert_eq!(err.record_id(), Some(a));
        assert_eq!(j.get(a), Some(&before));
    }

    #[test]
    fn replace_unknown_id_fails() {
        let mut j = Journal::new();
        assert_eq!(
            j.replace(TradeId(9), closed_draft(0)).unwrap_err(),
            ValidationError::UnknownTrade(TradeId(9))
        );
    }

    #[test]
    fn from_drafts_continues_numbering() {
        let drafts = vec![closed_draft(4), TradeDraft { id: None, ..closed_draft(0) }];
        let j = Journal::from_drafts(drafts).unwrap();
        let ids: Vec<TradeId> = j.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![TradeId(4), TradeId(5)]);
    }

    #[test]
    fn largest_stored_id_loads_but_blocks_new_ids() {
        let mut j = Journal::from_drafts(vec![closed_draft(u64::MAX)]).unwrap();
        assert_eq!(j.records()[0].id(), TradeId(u64::MAX));
        assert_eq!(
            j.add(closed_draft(0)).unwrap_err(),
            ValidationError::IdSpaceExhausted
        );
        assert_eq!(j.len(), 1);
    }

    #[test]
    fn id_less_draft_after_largest_id_fails() {
        let drafts = vec![closed_draft(u64::MAX), TradeDraft { id: None, ..closed_draft(0) }];
        assert_eq!(
            Journal::from_drafts(drafts).unwrap_err(),
            ValidationError::IdSpaceExhausted
        );
    }

    #[test]
    fn from_drafts_rejects_duplicates() {
        let err = Journal::from_drafts(vec![closed_draft(2), closed_draft(2)]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId(TradeId(2)));
    }

    #[test]
    fn recent_skips_open_and_orders_by_date() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let mut j = Journal::new();
        let a = j.add(closed_draft(0).with_date(day(1))).unwrap();
        let b = j.add(closed_draft(0).with_date(day(3))).unwrap();
        j.add(closed_draft(0).with_date(day(4)).with_exit_price(None)).unwrap();
        let d = j.add(closed_draft(0).with_date(day(3))).unwrap();

        let ids: Vec<TradeId> = j.recent(5).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![d, b, a]);
        assert_eq!(j.recent(1).len(), 1);
    }

    #[test]
    fn summary_reflects_edits() {
        let mut j = Journal::new();
        let a = j.add(closed_draft(0)).unwrap();
        assert_eq!(j.summary().win_rate, 100.0);
        let edit = j.get(a).unwrap().to_draft().with_pnl(-1.0);
        j.replace(a, edit).unwrap();
        assert_eq!(j.summary().win_rate, 0.0);
    }
}
