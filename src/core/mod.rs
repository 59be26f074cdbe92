//! Time-entry reconciliation pipeline:
//! bounds → (fetch) → splitter → aggregator → table → (render).

pub mod aggregator;
pub mod bounds;
pub mod splitter;
pub mod table;
pub mod timesheet;

use crate::models::Locale;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub use aggregator::aggregate;
pub use bounds::{parse_timezone, resolve_month_bounds};
pub use splitter::split;
pub use table::{TableOptions, build};
pub use timesheet::{TimeTrackingSource, TimesheetService};

/// What to do with an entry whose end precedes its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Warn and drop the entry.
    #[default]
    Skip,
    /// Fail the whole month.
    Abort,
}

/// Immutable settings handed to the pipeline for one run.
#[derive(Debug, Clone, Copy)]
pub struct TimesheetOptions {
    pub timezone: Tz,
    pub locale: Locale,
    pub show_description: bool,
    pub malformed: MalformedPolicy,
}

impl TimesheetOptions {
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            show_description: self.show_description,
            locale: self.locale,
        }
    }
}
