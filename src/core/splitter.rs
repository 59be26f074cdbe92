//! Converts one UTC interval into calendar-local sessions.

use crate::core::bounds::local_midnight;
use crate::errors::{AppError, AppResult};
use crate::models::{END_OF_DAY, RawEntry, START_OF_DAY, Session};
use crate::utils::time::format_clock;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Split `entry` at local midnight.
///
/// Returns one session when start and end share a local date, two when the
/// interval crosses exactly one local midnight. Zero-length entries yield a
/// single zero-hour session.
pub fn split(entry: &RawEntry, project_name: &str, tz: Tz) -> AppResult<Vec<Session>> {
    let start = entry.interval_start_utc;
    let end = entry.interval_end_utc;

    if !entry.is_well_formed() {
        return Err(AppError::MalformedInterval {
            entry_id: entry.id.clone(),
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }

    let local_start = start.with_timezone(&tz);
    let local_end = end.with_timezone(&tz);
    let start_date = local_start.date_naive();
    let end_date = local_end.date_naive();
    let description = entry.description.clone().unwrap_or_default();

    if start_date == end_date {
        return Ok(vec![Session {
            date: start_date.format("%Y-%m-%d").to_string(),
            start_time: format_clock(local_start.time()),
            end_time: format_clock(local_end.time()),
            work_hours: hours_between(start, end),
            project_name: project_name.to_string(),
            description,
        }]);
    }

    if start_date.succ_opt() != Some(end_date) {
        return Err(AppError::UnsupportedSpan {
            entry_id: entry.id.clone(),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
        });
    }

    // one instant shared by both halves: nothing gained or lost at the cut;
    // the first midnight of `end_date` when it repeats
    let midnight = local_midnight(tz, end_date);

    Ok(vec![
        Session {
            date: start_date.format("%Y-%m-%d").to_string(),
            start_time: format_clock(local_start.time()),
            end_time: END_OF_DAY.to_string(),
            work_hours: hours_between(start, midnight),
            project_name: project_name.to_string(),
            description: description.clone(),
        },
        Session {
            date: end_date.format("%Y-%m-%d").to_string(),
            start_time: START_OF_DAY.to_string(),
            end_time: format_clock(local_end.time()),
            work_hours: hours_between(midnight, end),
            project_name: project_name.to_string(),
            description,
        },
    ])
}
