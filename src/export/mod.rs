// src/export/mod.rs

mod csv;
mod fs_utils;
mod sheets;
mod xlsx;

pub use self::csv::CsvRenderer;
pub use self::fs_utils::Overwrite;
pub use self::sheets::{CloudSheetRenderer, format_requests};
pub use self::xlsx::SpreadsheetRenderer;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::TimesheetTable;
use crate::ui::messages::success;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output sink for a finished table. Returns where the result went
/// (file path or URL).
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, table: &TimesheetTable) -> AppResult<String>;
}

/// Run file I/O (and the overwrite prompt) on the blocking pool.
pub(crate) async fn run_blocking<T, F>(job: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| AppError::Other(format!("export task failed: {e}")))?
}

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[value(alias = "excel")]
    #[serde(alias = "excel")]
    Xlsx,
    Csv,
    #[value(alias = "google-sheets")]
    #[serde(alias = "googleSheets", alias = "google-sheets")]
    Sheets,
}

/// Per-run renderer settings coming from the CLI.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    pub overwrite: Overwrite,
}

/// Pick the renderer for `target.format`.
pub fn create_renderer(cfg: &Config, target: &RenderTarget) -> AppResult<Box<dyn Renderer>> {
    let renderer: Box<dyn Renderer> = match target.format {
        OutputFormat::Xlsx => Box::new(SpreadsheetRenderer::new(
            &target.output_dir,
            cfg.locale,
            cfg.excel.clone(),
            target.overwrite,
        )),
        OutputFormat::Csv => Box::new(CsvRenderer::new(
            &target.output_dir,
            cfg.locale,
            target.overwrite,
        )),
        OutputFormat::Sheets => {
            let sheets = cfg.google_sheets.clone().ok_or_else(|| {
                AppError::Config(
                    "google_sheets settings not found; add a google_sheets section to the config"
                        .to_string(),
                )
            })?;
            Box::new(CloudSheetRenderer::new(sheets, cfg.locale, cfg.excel.clone())?)
        }
    };
    Ok(renderer)
}
