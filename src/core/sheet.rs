//! Paper-sheet views: one sheet per set played at a table on a logical day,
//! plus plain paging for long listings.

use super::fees::{FeeAggregator, FeeSummary, SetKey};
use crate::models::{Rules, SequencedRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSheet {
    pub logical_date: NaiveDate,
    pub table_no: u32,
    pub set_no: u32,
    /// Ordered by daily sequence.
    pub rows: Vec<SequencedRecord>,
    pub fees: FeeSummary,
}

/// One page of a longer listing. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Build the sheets of `day`, optionally for one table, ordered by (table, set).
pub fn sheets_for_day(
    rows: &[SequencedRecord],
    rules: &Rules,
    day: NaiveDate,
    table_no: Option<u32>,
) -> Vec<SetSheet> {
    let mut groups: BTreeMap<SetKey, Vec<SequencedRecord>> = BTreeMap::new();

    for s in rows
        .iter()
        .filter(|s| s.logical_date == day)
        .filter(|s| table_no.is_none_or(|t| s.record.table_no == t))
    {
        groups
            .entry(SetKey {
                table_no: s.record.table_no,
                set_no: s.record.set_no,
            })
            .or_default()
            .push(s.clone());
    }

    groups
        .into_iter()
        .map(|(key, mut rows)| {
            rows.sort_by_key(|s| s.daily_sequence);
            let records: Vec<_> = rows.iter().map(|s| &s.record).collect();
            let fees = FeeAggregator::summarize(&records, rules);
            SetSheet {
                logical_date: day,
                table_no: key.table_no,
                set_no: key.set_no,
                rows,
                fees,
            }
        })
        .collect()
}

/// Cut `items` into pages of `page_size` and return page `page` (1-based).
///
/// A page past the end is clamped to the last page; `page_size == 0` means
/// everything on one page. Empty input gives one empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let size = if page_size == 0 {
        total_items.max(1)
    } else {
        page_size
    };
    let total_pages = total_items.div_ceil(size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * size;
    let end = (start + size).min(total_items);

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequencer::Sequencer;
    use crate::models::{Record, Seat};

    fn rec(game_id: u64, table_no: u32, set_no: u32, ts: &str, winner: &str) -> Record {
        Record {
            game_id,
            table_no,
            set_no,
            timestamp: ts.to_string(),
            note: String::new(),
            seats: vec![
                Seat::new("a", winner, 1),
                Seat::new("b", "C", 2),
                Seat::new("c", "C", 3),
            ],
        }
    }

    #[test]
    fn one_sheet_per_table_and_set_of_the_day() {
        let records = vec![
            rec(1, 1, 1, "2026-01-10 21:00", "A"),
            rec(2, 1, 1, "2026-01-10 20:00", "B"),
            rec(3, 1, 2, "2026-01-10 23:00", "A"),
            rec(4, 2, 1, "2026-01-10 22:00", "B"),
            rec(5, 1, 1, "2026-01-11 22:00", "B"),
        ];
        let rows = Sequencer::sequence(&records);
        let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        let sheets = sheets_for_day(&rows, &Rules::default(), day, None);
        assert_eq!(sheets.len(), 3);
        assert_eq!((sheets[0].table_no, sheets[0].set_no), (1, 1));
        assert_eq!(
            sheets[0]
                .rows
                .iter()
                .map(|s| s.record.game_id)
                .collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(sheets[0].fees.total_fee, 8);
        assert_eq!(sheets[1].fees.total_fee, 3);

        let only_two = sheets_for_day(&rows, &Rules::default(), day, Some(2));
        assert_eq!(only_two.len(), 1);
        assert_eq!(only_two[0].fees.total_fee, 5);
    }

    #[test]
    fn paging_clamps_and_counts() {
        let items: Vec<u32> = (1..=7).collect();

        let p = paginate(&items, 2, 3);
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total_pages, 3);

        let last = paginate(&items, 99, 3);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![7]);

        assert_eq!(paginate(&items, 1, 0).items.len(), 7);

        let empty = paginate::<u32>(&[], 1, 3);
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_pages, 1);
    }
}
