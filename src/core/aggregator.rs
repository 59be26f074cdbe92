//! Folds sessions from all entries into ordered, day-keyed structures.

use crate::core::splitter::split;
use crate::core::{MalformedPolicy, TimesheetOptions};
use crate::errors::{AppError, AppResult};
use crate::models::{ProjectIndex, RawEntry, Session, WorkDay};
use crate::utils::date::weekday_of;
use crate::utils::time::minutes_of_day;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Total order on sessions of one day: start time first, then the remaining
/// fields so that equal start times don't depend on input order.
fn session_order(a: &Session, b: &Session) -> Ordering {
    minutes_of_day(&a.start_time)
        .cmp(&minutes_of_day(&b.start_time))
        .then_with(|| minutes_of_day(&a.end_time).cmp(&minutes_of_day(&b.end_time)))
        .then_with(|| a.project_name.cmp(&b.project_name))
        .then_with(|| a.description.cmp(&b.description))
        .then_with(|| a.work_hours.total_cmp(&b.work_hours))
}

/// Build the ordered WorkDay list for a set of entries.
///
/// Unknown project ids degrade to the locale's placeholder. Entries whose end
/// precedes their start are skipped or abort the run depending on
/// `options.malformed`; an entry spanning two local midnights always aborts.
pub fn aggregate(
    entries: &[RawEntry],
    projects: &ProjectIndex,
    options: &TimesheetOptions,
) -> AppResult<Vec<WorkDay>> {
    let unknown = options.locale.unknown_project();
    let mut days: BTreeMap<String, WorkDay> = BTreeMap::new();
    let mut missing_projects: BTreeSet<&str> = BTreeSet::new();
    let mut skipped = 0usize;

    for entry in entries {
        let project_name = match projects.name_for(entry.project_id.as_deref()) {
            Some(name) => name,
            None => {
                if let Some(id) = entry.project_id.as_deref() {
                    missing_projects.insert(id);
                }
                unknown
            }
        };

        let sessions = match split(entry, project_name, options.timezone) {
            Ok(s) => s,
            Err(e @ AppError::MalformedInterval { .. })
                if options.malformed == MalformedPolicy::Skip =>
            {
                warn!(entry = %entry.id, error = %e, "skipping malformed entry");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for session in sessions {
            let day = days.entry(session.date.clone()).or_insert_with(|| {
                let label = weekday_of(&session.date)
                    .map_or("", |wd| options.locale.weekday_label(wd));
                WorkDay::new(session.date.clone(), label)
            });
            day.sessions.push(session);
        }
    }

    for id in &missing_projects {
        warn!(project_id = %id, "unknown project id, using placeholder label");
    }

    for day in days.values_mut() {
        day.sessions.sort_by(session_order);
    }

    debug!(
        entries = entries.len(),
        days = days.len(),
        skipped,
        "entries aggregated"
    );

    // BTreeMap iterates keys in ascending YYYY-MM-DD order
    Ok(days.into_values().collect())
}
