//! Cross-session player statistics and leaderboards.

use crate::models::{Record, Rules};
use crate::utils::date::logical_date_of;
use crate::utils::period::{self, DateBounds};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_MIN_GAMES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub name: String,
    pub games: u32,
    pub avg_rank: f64,
    pub first_count: u32,
    /// Games finished in the bottom rank for the active seat count.
    pub last_count: u32,
    pub top_rate: f64,
    pub last_avoid_rate: f64,
}

/// The four leaderboards, each sorted on its own key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Rankings {
    pub by_games: Vec<PlayerStats>,
    pub by_avg_rank: Vec<PlayerStats>,
    pub by_top_rate: Vec<PlayerStats>,
    pub by_last_avoid: Vec<PlayerStats>,
}

impl Rankings {
    pub fn is_empty(&self) -> bool {
        self.by_games.is_empty()
    }
}

#[derive(Default)]
struct Tally {
    games: u32,
    /// Wide enough for any count of dirty `i64` ranks.
    rank_sum: i128,
    first: u32,
    last: u32,
}

pub struct RankingEngine;

impl RankingEngine {
    /// Stats for every player, in order of first appearance.
    ///
    /// Seats with an empty name or a non-positive rank are skipped.
    pub fn player_stats(records: &[Record], rules: &Rules) -> Vec<PlayerStats> {
        let last_rank = rules.last_rank();
        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, Tally> = HashMap::new();

        for seat in records.iter().flat_map(|r| &r.seats) {
            let name = seat.name.trim();
            if name.is_empty() || seat.rank <= 0 {
                continue;
            }

            let t = tallies.entry(name).or_insert_with(|| {
                order.push(name);
                Tally::default()
            });
            t.games += 1;
            t.rank_sum += i128::from(seat.rank);
            if seat.rank == 1 {
                t.first += 1;
            }
            if seat.rank == last_rank {
                t.last += 1;
            }
        }

        order
            .into_iter()
            .filter_map(|name| tallies.get(name).map(|t| to_stats(name, t)))
            .collect()
    }

    /// Leaderboards over players with at least `min_games` games.
    pub fn rankings(records: &[Record], rules: &Rules, min_games: u32) -> Rankings {
        let eligible: Vec<PlayerStats> = Self::player_stats(records, rules)
            .into_iter()
            .filter(|s| s.games >= min_games)
            .collect();

        if eligible.is_empty() {
            return Rankings::default();
        }

        Rankings {
            by_games: sorted_by(&eligible, |a, b| b.games.cmp(&a.games)),
            by_avg_rank: sorted_by(&eligible, |a, b| a.avg_rank.total_cmp(&b.avg_rank)),
            by_top_rate: sorted_by(&eligible, |a, b| b.top_rate.total_cmp(&a.top_rate)),
            by_last_avoid: sorted_by(&eligible, |a, b| {
                b.last_avoid_rate.total_cmp(&a.last_avoid_rate)
            }),
        }
    }

    /// Same as [`rankings`](Self::rankings), limited to games whose logical
    /// date falls inside `bounds`.
    pub fn rankings_in(
        records: &[Record],
        rules: &Rules,
        min_games: u32,
        bounds: &Option<DateBounds>,
    ) -> Rankings {
        let in_range: Vec<Record> = records
            .iter()
            .filter(|r| period::contains(bounds, logical_date_of(&r.timestamp)))
            .cloned()
            .collect();
        Self::rankings(&in_range, rules, min_games)
    }
}

fn to_stats(name: &str, t: &Tally) -> PlayerStats {
    let games = f64::from(t.games);
    PlayerStats {
        name: name.to_string(),
        games: t.games,
        avg_rank: t.rank_sum as f64 / games,
        first_count: t.first,
        last_count: t.last,
        top_rate: f64::from(t.first) / games * 100.0,
        last_avoid_rate: f64::from(t.games - t.last) / games * 100.0,
    }
}

fn sorted_by<F>(stats: &[PlayerStats], cmp: F) -> Vec<PlayerStats>
where
    F: Fn(&PlayerStats, &PlayerStats) -> Ordering,
{
    let mut out = stats.to_vec();
    out.sort_by(cmp);
    out
}
