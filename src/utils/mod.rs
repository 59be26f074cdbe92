pub mod date;
pub mod time;

pub use time::{format_hours_decimal, format_hours_hmm};
