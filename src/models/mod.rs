pub mod record;
pub mod rules;
pub mod sequenced;

pub use record::{Record, Seat};
pub use rules::Rules;
pub use sequenced::SequencedRecord;
