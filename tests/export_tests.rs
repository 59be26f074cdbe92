mod common;
use common::{entry, options, utc};

use clockify_timesheet::config::ExcelSettings;
use clockify_timesheet::core::{aggregate, build};
use clockify_timesheet::export::{CsvRenderer, Overwrite, Renderer, SpreadsheetRenderer};
use clockify_timesheet::models::{Locale, Project, ProjectIndex, TimesheetTable};
use std::fs;

fn table(locale: Locale) -> TimesheetTable {
    let projects = ProjectIndex::new(&[Project {
        id: "p1".into(),
        name: "Alpha, Inc".into(),
    }]);
    let entries = vec![
        entry("a", Some("p1"), utc(2024, 1, 15, 0, 0), utc(2024, 1, 15, 8, 0)),
        entry("b", Some("p1"), utc(2024, 1, 16, 0, 0), utc(2024, 1, 16, 1, 0)),
    ];
    let opts = options("Asia/Tokyo", locale);
    let days = aggregate(&entries, &projects, &opts).unwrap();
    build(&days, 2024, 1, opts.table_options())
}

#[tokio::test]
async fn test_csv_renderer_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CsvRenderer::new(dir.path(), Locale::Ja, Overwrite::Never);

    let location = renderer.render(&table(Locale::Ja)).await.unwrap();
    assert!(location.ends_with("勤務表_2024年1月.csv"));

    let content = fs::read_to_string(&location).unwrap();
    assert!(content.starts_with('\u{feff}'));
    assert!(content.contains("\"Alpha, Inc\""));
    assert!(content.contains("合計,,,,,9:00,9.00"));

    // existing file, no --force
    assert!(renderer.render(&table(Locale::Ja)).await.is_err());
}

#[tokio::test]
async fn test_xlsx_renderer_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = SpreadsheetRenderer::new(
        dir.path(),
        Locale::En,
        ExcelSettings::default(),
        Overwrite::Always,
    );

    let location = renderer.render(&table(Locale::En)).await.unwrap();
    assert!(location.ends_with("timesheet_2024-01.xlsx"));

    let bytes = fs::read(&location).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    // forced overwrite succeeds
    renderer.render(&table(Locale::En)).await.unwrap();
}
