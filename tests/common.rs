#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use clockify_timesheet::core::{MalformedPolicy, TimeTrackingSource, TimesheetOptions};
use clockify_timesheet::errors::AppResult;
use clockify_timesheet::export::Renderer;
use clockify_timesheet::models::{Locale, Project, RawEntry, TimesheetTable};
use std::path::Path;
use std::sync::Mutex;

/// Binary under test with an isolated HOME and no Clockify variables leaking in.
pub fn cts(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("clockify-timesheet");
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("CLOCKIFY_API_KEY")
        .env_remove("CLOCKIFY_WORKSPACE_ID")
        .env_remove("CLOCKIFY_USER_ID")
        .env_remove("TIMEZONE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn entry(id: &str, project: Option<&str>, start: DateTime<Utc>, end: DateTime<Utc>) -> RawEntry {
    RawEntry::new(id, project.map(str::to_string), None, start, end)
}

pub fn options(tz: &str, locale: Locale) -> TimesheetOptions {
    TimesheetOptions {
        timezone: tz.parse().unwrap(),
        locale,
        show_description: false,
        malformed: MalformedPolicy::Skip,
    }
}

/// In-memory source; records the requested window.
#[derive(Default)]
pub struct FakeSource {
    pub entries: Vec<RawEntry>,
    pub projects: Vec<Project>,
    pub window: Mutex<Option<(DateTime<Utc>, DateTime<Utc>)>>,
}

#[async_trait]
impl TimeTrackingSource for FakeSource {
    async fn fetch_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RawEntry>> {
        *self.window.lock().unwrap() = Some((start, end));
        Ok(self.entries.clone())
    }

    async fn fetch_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.projects.clone())
    }
}

/// Keeps every table it is handed.
#[derive(Default)]
pub struct RecordingRenderer {
    pub tables: Mutex<Vec<TimesheetTable>>,
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render(&self, table: &TimesheetTable) -> AppResult<String> {
        self.tables.lock().unwrap().push(table.clone());
        Ok(format!("memory://{}-{:02}", table.year, table.month))
    }
}
