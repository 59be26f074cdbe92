use crate::core::bounds::resolve_month_bounds_tz;
use crate::core::{TimesheetOptions, aggregate, build};
use crate::errors::AppResult;
use crate::export::Renderer;
use crate::models::{Project, ProjectIndex, RawEntry, TimesheetTable};
use crate::ui::messages::{info, success, warning};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Where raw entries and project names come from.
#[async_trait]
pub trait TimeTrackingSource: Send + Sync {
    async fn fetch_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RawEntry>>;

    async fn fetch_projects(&self) -> AppResult<Vec<Project>>;
}

/// Monthly timesheet: fetch, reconcile, render.
pub struct TimesheetService<'a> {
    source: &'a dyn TimeTrackingSource,
    renderer: &'a dyn Renderer,
    options: TimesheetOptions,
}

impl<'a> TimesheetService<'a> {
    pub fn new(
        source: &'a dyn TimeTrackingSource,
        renderer: &'a dyn Renderer,
        options: TimesheetOptions,
    ) -> Self {
        Self {
            source,
            renderer,
            options,
        }
    }

    /// Fetch and reconcile one month. `None` when the source has no entries.
    pub async fn build_monthly_table(
        &self,
        year: i32,
        month: u32,
    ) -> AppResult<Option<TimesheetTable>> {
        let (start, end) = resolve_month_bounds_tz(year, month, self.options.timezone)?;
        debug!(%start, %end, tz = %self.options.timezone, "month bounds resolved");

        info(format!("Fetching time entries for {year}-{month:02}…"));
        let entries = self.source.fetch_entries(start, end).await?;

        if entries.is_empty() {
            warning("No time entries found for the selected month.");
            return Ok(None);
        }

        info("Fetching projects…");
        let projects = ProjectIndex::new(&self.source.fetch_projects().await?);

        info(format!("Processing {} entries…", entries.len()));
        let work_days = aggregate(&entries, &projects, &self.options)?;

        Ok(Some(build(
            &work_days,
            year,
            month,
            self.options.table_options(),
        )))
    }

    /// Full run; returns the renderer's location (file path or URL).
    pub async fn generate_monthly(&self, year: i32, month: u32) -> AppResult<Option<String>> {
        let Some(table) = self.build_monthly_table(year, month).await? else {
            return Ok(None);
        };

        let location = self.renderer.render(&table).await?;

        success(format!("Timesheet generated: {location}"));
        info(format!("Monthly total: {:.2} h", table.total_hours));
        info(format!("Days worked: {}", table.work_day_count));

        Ok(Some(location))
    }
}
