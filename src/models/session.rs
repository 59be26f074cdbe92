use serde::Serialize;

/// End time of the first half of a split entry.
pub const END_OF_DAY: &str = "24:00";
/// Start time of the second half of a split entry.
pub const START_OF_DAY: &str = "0:00";

/// A contiguous block of work wholly inside one local calendar date.
///
/// `start_time`/`end_time` are local wall-clock `HH:MM` strings; the two
/// sentinels above mark the halves of an entry split at local midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub work_hours: f64,
    pub project_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDay {
    pub date: String,
    pub day_of_week: String,
    pub sessions: Vec<Session>,
}

impl WorkDay {
    pub fn new(date: impl Into<String>, day_of_week: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            day_of_week: day_of_week.into(),
            sessions: Vec::new(),
        }
    }
}
