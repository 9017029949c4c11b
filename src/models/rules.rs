use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Fee owed to the house when a player holding `token` wins a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFee {
    pub token: String,
    pub fee: i64,
}

/// Note text that discounts the set total by `penalty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialNote {
    pub text: String,
    pub penalty: i64,
}

/// Table rules shared by the fee and ranking engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_seat_count")]
    pub seat_count: usize,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryFee>,
    #[serde(default = "default_special_notes")]
    pub special_notes: Vec<SpecialNote>,
}

fn default_seat_count() -> usize {
    3
}

fn default_categories() -> Vec<CategoryFee> {
    // A, B: customers. C, D: staff.
    [("A", 3), ("B", 5), ("C", 1), ("D", 1)]
        .into_iter()
        .map(|(token, fee)| CategoryFee {
            token: token.to_string(),
            fee,
        })
        .collect()
}

fn default_special_notes() -> Vec<SpecialNote> {
    [("１人飛ばし", 1), ("２人飛ばし", 2), ("役満", 5)]
        .into_iter()
        .map(|(text, penalty)| SpecialNote {
            text: text.to_string(),
            penalty,
        })
        .collect()
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            seat_count: default_seat_count(),
            categories: default_categories(),
            special_notes: default_special_notes(),
        }
    }
}

impl Rules {
    pub fn four_players() -> Self {
        Self {
            seat_count: 4,
            ..Self::default()
        }
    }

    /// Reject configurations the engines cannot work with.
    pub fn check(&self) -> AppResult<()> {
        if !(3..=4).contains(&self.seat_count) {
            return Err(AppError::Config(format!(
                "seat_count must be 3 or 4, got {}",
                self.seat_count
            )));
        }

        for (i, c) in self.categories.iter().enumerate() {
            if c.token.trim().is_empty() {
                return Err(AppError::Config("empty category token".into()));
            }
            if self.categories[..i].iter().any(|o| o.token == c.token) {
                return Err(AppError::Config(format!(
                    "duplicate category token '{}'",
                    c.token
                )));
            }
        }

        Ok(())
    }

    pub fn fee_for(&self, token: &str) -> Option<i64> {
        self.categories
            .iter()
            .find(|c| c.token == token)
            .map(|c| c.fee)
    }

    /// Exact match only: "２人飛ばし " is not a special note.
    pub fn penalty_for(&self, note: &str) -> Option<i64> {
        self.special_notes
            .iter()
            .find(|n| n.text == note)
            .map(|n| n.penalty)
    }

    pub fn is_known_category(&self, token: &str) -> bool {
        self.fee_for(token).is_some()
    }

    /// Worst finishing position for the active seat count.
    pub fn last_rank(&self) -> i64 {
        self.seat_count as i64
    }

    pub fn category_tokens(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.token.as_str())
    }
}
