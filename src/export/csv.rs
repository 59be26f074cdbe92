// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{Overwrite, ensure_writable, output_path};
use crate::export::{Renderer, notify_export_success, run_blocking};
use crate::models::{Locale, TimesheetTable};
use crate::ui::messages::info;
use async_trait::async_trait;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// UTF-8 BOM so spreadsheet apps detect the encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvRenderer {
    output_dir: PathBuf,
    locale: Locale,
    overwrite: Overwrite,
}

impl CsvRenderer {
    pub fn new(output_dir: &Path, locale: Locale, overwrite: Overwrite) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            locale,
            overwrite,
        }
    }

    /// Header + rows, standard quoting.
    pub fn write_table(table: &TimesheetTable, path: &Path) -> AppResult<()> {
        let mut file = File::create(path)?;
        file.write_all(BOM)?;

        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        for record in table.to_matrix() {
            wtr.write_record(&record)
                .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for CsvRenderer {
    async fn render(&self, table: &TimesheetTable) -> AppResult<String> {
        let stem = self.locale.file_stem(table.year, table.month);
        let dir = self.output_dir.clone();
        let overwrite = self.overwrite;
        let table = table.clone();

        run_blocking(move || {
            let path = output_path(&dir, &stem, "csv")?;
            ensure_writable(&path, overwrite)?;

            info(format!("Exporting to CSV: {}", path.display()));
            Self::write_table(&table, &path)?;

            notify_export_success("CSV", &path);
            Ok(path.display().to_string())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TableOptions, build};
    use crate::models::{Session, WorkDay};

    fn table() -> TimesheetTable {
        let day = WorkDay {
            date: "2024-01-15".into(),
            day_of_week: "月".into(),
            sessions: vec![Session {
                date: "2024-01-15".into(),
                start_time: "09:00".into(),
                end_time: "10:30".into(),
                work_hours: 1.5,
                project_name: "Alpha".into(),
                description: "say \"hi\", then\nleave".into(),
            }],
        };
        build(
            &[day],
            2024,
            1,
            TableOptions {
                show_description: true,
                locale: Locale::Ja,
            },
        )
    }

    #[tokio::test]
    async fn writes_bom_header_rows_and_total() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CsvRenderer::new(dir.path(), Locale::Ja, Overwrite::Never);

        let location = renderer.render(&table()).await.unwrap();
        assert!(location.ends_with("勤務表_2024年1月.csv"));

        let bytes = std::fs::read(&location).unwrap();
        assert!(bytes.starts_with(BOM));

        let text = String::from_utf8(bytes[BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "日付,曜日,プロジェクト,作業内容,出勤時刻,退勤時刻,労働時間,労働時間(h)"
        );
        assert!(text.contains("01/15,月,Alpha,\"say \"\"hi\"\", then\nleave\",09:00,10:30,1:30,1.50"));
        assert!(text.contains("合計,,,,,,1:30,1.50"));
    }

    #[tokio::test]
    async fn concurrent_renders_on_single_thread_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CsvRenderer::new(dir.path(), Locale::En, Overwrite::Never);

        let january = table();
        let mut february = table();
        february.month = 2;

        let (a, b) = tokio::join!(renderer.render(&january), renderer.render(&february));
        assert!(a.unwrap().ends_with("timesheet_2024-01.csv"));
        assert!(b.unwrap().ends_with("timesheet_2024-02.csv"));
    }

    #[tokio::test]
    async fn existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let t = table();

        CsvRenderer::new(dir.path(), Locale::En, Overwrite::Never)
            .render(&t)
            .await
            .unwrap();
        assert!(
            CsvRenderer::new(dir.path(), Locale::En, Overwrite::Never)
                .render(&t)
                .await
                .is_err()
        );
        assert!(
            CsvRenderer::new(dir.path(), Locale::En, Overwrite::Always)
                .render(&t)
                .await
                .is_ok()
        );
    }
}
