use crate::models::{Seat, SequencedRecord};
use serde::Serialize;

/// One exported row. Flat so the same shape serves CSV and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameExport {
    pub game_no: u64,
    pub logical_date: String,
    pub daily_sequence: u32,
    pub table_no: u32,
    pub set_no: u32,
    pub timestamp: String,
    pub note: String,

    pub seat_a_name: String,
    pub seat_a_category: String,
    pub seat_a_rank: Option<i64>,
    pub seat_b_name: String,
    pub seat_b_category: String,
    pub seat_b_rank: Option<i64>,
    pub seat_c_name: String,
    pub seat_c_category: String,
    pub seat_c_rank: Option<i64>,
    pub seat_d_name: String,
    pub seat_d_category: String,
    pub seat_d_rank: Option<i64>,
}

fn seat_cells(seat: Option<&Seat>) -> (String, String, Option<i64>) {
    match seat {
        Some(s) => (s.name.clone(), s.category.clone(), Some(s.rank)),
        None => (String::new(), String::new(), None),
    }
}

impl From<&SequencedRecord> for GameExport {
    fn from(row: &SequencedRecord) -> Self {
        let r = &row.record;
        let (seat_a_name, seat_a_category, seat_a_rank) = seat_cells(r.seats.first());
        let (seat_b_name, seat_b_category, seat_b_rank) = seat_cells(r.seats.get(1));
        let (seat_c_name, seat_c_category, seat_c_rank) = seat_cells(r.seats.get(2));
        let (seat_d_name, seat_d_category, seat_d_rank) = seat_cells(r.seats.get(3));

        Self {
            game_no: r.game_id,
            logical_date: row.logical_date.format("%Y-%m-%d").to_string(),
            daily_sequence: row.daily_sequence,
            table_no: r.table_no,
            set_no: r.set_no,
            timestamp: r.timestamp.clone(),
            note: r.note.clone(),
            seat_a_name,
            seat_a_category,
            seat_a_rank,
            seat_b_name,
            seat_b_category,
            seat_b_rank,
            seat_c_name,
            seat_c_category,
            seat_c_rank,
            seat_d_name,
            seat_d_category,
            seat_d_rank,
        }
    }
}
