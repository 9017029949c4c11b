//! Per-set fee totals and winner-category tallies.

use crate::models::{Record, Rules};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FeeSummary {
    /// May be negative when note discounts exceed the fees.
    pub total_fee: i64,
    /// Every configured token is present, unused ones at 0.
    pub category_counts: BTreeMap<String, u32>,
}

/// Identifies one fee-settlement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SetKey {
    pub table_no: u32,
    pub set_no: u32,
}

pub struct FeeAggregator;

impl FeeAggregator {
    /// Fee summary of one group of records. Pure: same group, same result.
    pub fn summarize<R: Borrow<Record>>(group: &[R], rules: &Rules) -> FeeSummary {
        let mut summary = FeeSummary {
            total_fee: 0,
            category_counts: rules.category_tokens().map(|t| (t.to_string(), 0)).collect(),
        };

        for r in group {
            let r: &Record = r.borrow();

            let winner_fee = r
                .winner()
                .and_then(|w| rules.fee_for(&w.category).map(|fee| (&w.category, fee)));
            if let Some((token, fee)) = winner_fee {
                *summary.category_counts.entry(token.clone()).or_insert(0) += 1;
                summary.total_fee += fee;
            }

            // applies whoever won, even on malformed rows
            if let Some(penalty) = rules.penalty_for(&r.note) {
                summary.total_fee -= penalty;
            }
        }

        summary
    }

    /// Split records into (table_no, set_no) groups, each in input order.
    pub fn group_by_set<R: Borrow<Record>>(records: &[R]) -> BTreeMap<SetKey, Vec<&Record>> {
        let mut groups: BTreeMap<SetKey, Vec<&Record>> = BTreeMap::new();
        for r in records {
            let r: &Record = r.borrow();
            groups
                .entry(SetKey {
                    table_no: r.table_no,
                    set_no: r.set_no,
                })
                .or_default()
                .push(r);
        }
        groups
    }

    /// Summaries for every set found in `records`.
    pub fn summarize_sets<R: Borrow<Record>>(
        records: &[R],
        rules: &Rules,
    ) -> BTreeMap<SetKey, FeeSummary> {
        Self::group_by_set(records)
            .into_iter()
            .map(|(key, group)| (key, Self::summarize(&group, rules)))
            .collect()
    }
}
