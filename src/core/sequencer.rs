//! Logical-day bucketing and per-(day, table) game numbering.

use crate::models::{Record, SequencedRecord};
use crate::utils::date::{self, sentinel_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// What the entry form proposes for the next game at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextSlot {
    pub set_no: u32,
    pub daily_sequence: u32,
}

impl NextSlot {
    /// True when no game was recorded yet at this table on this day.
    pub fn opens_day(&self) -> bool {
        self.daily_sequence == 1
    }
}

pub struct Sequencer;

impl Sequencer {
    /// Derive `logical_date` and `daily_sequence` for every record.
    ///
    /// Output keeps the input order. Within a (logical_date, table_no) group
    /// records are numbered 1..=k by ascending timestamp; equal timestamps keep
    /// their input order. Unreadable timestamps land on the sentinel date.
    pub fn sequence(records: &[Record]) -> Vec<SequencedRecord> {
        let keys: Vec<(NaiveDate, NaiveDateTime)> = records
            .iter()
            .map(|r| match r.parsed_timestamp() {
                Ok(ts) => (date::logical_date(ts), ts),
                Err(_) => (date::sentinel_date(), sentinel_timestamp()),
            })
            .collect();

        let mut groups: BTreeMap<(NaiveDate, u32), Vec<usize>> = BTreeMap::new();
        for (idx, r) in records.iter().enumerate() {
            groups.entry((keys[idx].0, r.table_no)).or_default().push(idx);
        }

        let mut seq = vec![0u32; records.len()];
        for members in groups.values_mut() {
            // stable: ties stay in input order
            members.sort_by_key(|&idx| keys[idx].1);
            for (pos, &idx) in members.iter().enumerate() {
                seq[idx] = pos as u32 + 1;
            }
        }

        records
            .iter()
            .zip(keys)
            .zip(seq)
            .map(|((r, (logical_date, _)), daily_sequence)| SequencedRecord {
                record: r.clone(),
                logical_date,
                daily_sequence,
            })
            .collect()
    }

    /// Sort a sequenced view by (logical_date, table_no, daily_sequence).
    pub fn sorted(mut rows: Vec<SequencedRecord>) -> Vec<SequencedRecord> {
        rows.sort_by_key(|s| (s.logical_date, s.record.table_no, s.daily_sequence));
        rows
    }

    /// Set number and ordinal proposed for the next game of `table_no` on `day`.
    /// An empty group proposes 1 for both.
    pub fn next_slot(rows: &[SequencedRecord], table_no: u32, day: NaiveDate) -> NextSlot {
        let group = rows
            .iter()
            .filter(|s| s.record.table_no == table_no && s.logical_date == day);

        let (max_set, max_seq) = group.fold((0, 0), |(set, seq), s| {
            (set.max(s.record.set_no), seq.max(s.daily_sequence))
        });

        NextSlot {
            set_no: max_set.max(1),
            daily_sequence: max_seq + 1,
        }
    }

    /// Highest set number per table over the whole collection.
    pub fn max_set_per_table(records: &[Record]) -> BTreeMap<u32, u32> {
        let mut out = BTreeMap::new();
        for r in records {
            let e = out.entry(r.table_no).or_insert(0);
            *e = (*e).max(r.set_no);
        }
        out
    }
}
