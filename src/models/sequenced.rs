use super::record::Record;
use chrono::NaiveDate;
use serde::Serialize;

/// A record plus the view fields the sequencer derives. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequencedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub logical_date: NaiveDate,
    pub daily_sequence: u32,
}
