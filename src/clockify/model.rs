use crate::models::{Project, RawEntry};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// `GET /workspaces/{ws}/user/{user}/time-entries` item.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntryDto {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,
    #[serde(rename = "timeInterval")]
    pub time_interval: TimeIntervalDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeIntervalDto {
    pub start: DateTime<Utc>,
    /// `null` while the timer is running.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
}

impl From<ProjectDto> for Project {
    fn from(p: ProjectDto) -> Self {
        Project {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "activeWorkspace", default)]
    pub active_workspace: Option<String>,
    #[serde(rename = "defaultWorkspace", default)]
    pub default_workspace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceDto {
    pub id: String,
    pub name: String,
}

/// Wire entries → pipeline entries. Running timers have no end yet and are
/// dropped. Empty descriptions become `None`.
pub fn into_raw_entries(dtos: Vec<TimeEntryDto>) -> Vec<RawEntry> {
    dtos.into_iter()
        .filter_map(|dto| {
            let Some(end) = dto.time_interval.end else {
                warn!(entry_id = %dto.id, "skipping running timer (no end time)");
                return None;
            };

            let description = dto.description.filter(|d| !d.trim().is_empty());
            let project_id = dto.project_id.filter(|p| !p.is_empty());

            Some(RawEntry::new(
                dto.id,
                project_id,
                description,
                dto.time_interval.start,
                end,
            ))
        })
        .collect()
}
