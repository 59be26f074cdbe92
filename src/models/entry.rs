use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One tracked interval as reported by the time-tracking source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawEntry {
    pub id: String,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub interval_start_utc: DateTime<Utc>,
    pub interval_end_utc: DateTime<Utc>,
}

impl RawEntry {
    pub fn new(
        id: impl Into<String>,
        project_id: Option<String>,
        description: Option<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id,
            description,
            interval_start_utc: start,
            interval_end_utc: end,
        }
    }

    /// `end >= start`
    pub fn is_well_formed(&self) -> bool {
        self.interval_end_utc >= self.interval_start_utc
    }

    /// Elapsed time in (fractional) hours.
    pub fn duration_hours(&self) -> f64 {
        let ms = (self.interval_end_utc - self.interval_start_utc).num_milliseconds();
        ms as f64 / 3_600_000.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// id → name lookup built once per run.
#[derive(Debug, Default, Clone)]
pub struct ProjectIndex {
    names: HashMap<String, String>,
}

impl ProjectIndex {
    pub fn new(projects: &[Project]) -> Self {
        let names = projects
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        Self { names }
    }

    /// Returns `None` when the entry has no project or the id is unknown.
    pub fn name_for(&self, project_id: Option<&str>) -> Option<&str> {
        project_id
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
    }
}
