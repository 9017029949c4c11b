pub mod add;
pub mod del;
pub mod edit;
pub mod fees;
pub mod import;
pub mod log;
pub mod migrate;
pub mod ranking;
pub mod sequencer;
pub mod sheet;
