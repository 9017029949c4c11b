pub mod date;
pub mod number;
pub mod period;
pub mod table;
