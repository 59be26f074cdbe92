mod common;
use common::{FakeSource, RecordingRenderer, entry, options, utc};

use clockify_timesheet::core::TimesheetService;
use clockify_timesheet::errors::AppError;
use clockify_timesheet::models::{Locale, Project};

fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "p1".into(),
            name: "Alpha".into(),
        },
        Project {
            id: "p2".into(),
            name: "Beta".into(),
        },
    ]
}

#[tokio::test]
async fn test_monthly_table_from_fake_source() {
    let source = FakeSource {
        entries: vec![
            // 2024-01-16 10:00-12:00 JST
            entry("a", Some("p2"), utc(2024, 1, 16, 1, 0), utc(2024, 1, 16, 3, 0)),
            // 2024-01-15 23:00 → 01:30 JST, crosses midnight
            entry("b", Some("p1"), utc(2024, 1, 15, 14, 0), utc(2024, 1, 15, 16, 30)),
            // unknown project
            entry("c", Some("zz"), utc(2024, 1, 20, 0, 0), utc(2024, 1, 20, 0, 45)),
        ],
        projects: projects(),
        ..FakeSource::default()
    };
    let renderer = RecordingRenderer::default();
    let service = TimesheetService::new(&source, &renderer, options("Asia/Tokyo", Locale::Ja));

    let location = service.generate_monthly(2024, 1).await.unwrap();
    assert_eq!(location.as_deref(), Some("memory://2024-01"));

    // window: local Jan 1 00:00 → Jan 31 23:59:59 JST
    let (start, end) = source.window.lock().unwrap().unwrap();
    assert_eq!(start, utc(2023, 12, 31, 15, 0));
    assert_eq!(end.to_rfc3339(), "2024-01-31T14:59:59+00:00");

    let tables = renderer.tables.lock().unwrap();
    assert_eq!(tables.len(), 1);
    let t = &tables[0];

    let dates: Vec<&str> = t.rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["01/15", "01/16", "", "01/20", "合計"]);

    assert_eq!(t.rows[0].end_time, "24:00");
    assert_eq!(t.rows[1].start_time, "0:00");
    assert_eq!(t.rows[1].project_name, "Alpha");
    assert_eq!(t.rows[2].project_name, "Beta");
    assert_eq!(t.rows[3].project_name, "プロジェクト不明");
    assert_eq!(t.rows[0].day_of_week, "月");

    // 2.5 + 2.0 + 0.75
    assert!((t.total_hours - 5.25).abs() < 1e-9);
    assert_eq!(t.rows.last().unwrap().work_hours_formatted, "5:15");
    assert_eq!(t.work_day_count, 3);
}

#[tokio::test]
async fn test_empty_month_renders_nothing() {
    let source = FakeSource::default();
    let renderer = RecordingRenderer::default();
    let service = TimesheetService::new(&source, &renderer, options("UTC", Locale::En));

    assert_eq!(service.generate_monthly(2024, 2).await.unwrap(), None);
    assert!(renderer.tables.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_month_fails_before_fetch() {
    let source = FakeSource::default();
    let renderer = RecordingRenderer::default();
    let service = TimesheetService::new(&source, &renderer, options("UTC", Locale::En));

    let err = service.generate_monthly(2024, 13).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidMonth(13)));
    assert!(source.window.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_two_midnights_abort_the_run() {
    let source = FakeSource {
        entries: vec![entry(
            "long",
            Some("p1"),
            utc(2024, 3, 4, 20, 0),
            utc(2024, 3, 6, 2, 0),
        )],
        projects: projects(),
        ..FakeSource::default()
    };
    let renderer = RecordingRenderer::default();
    let service = TimesheetService::new(&source, &renderer, options("UTC", Locale::En));

    let err = service.generate_monthly(2024, 3).await.unwrap_err();
    assert!(matches!(err, AppError::UnsupportedSpan { .. }));
    assert!(renderer.tables.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_english_locale_labels() {
    let source = FakeSource {
        entries: vec![entry("a", None, utc(2024, 1, 15, 9, 0), utc(2024, 1, 15, 10, 0))],
        projects: projects(),
        ..FakeSource::default()
    };
    let renderer = RecordingRenderer::default();
    let service = TimesheetService::new(&source, &renderer, options("UTC", Locale::En));

    let table = service.build_monthly_table(2024, 1).await.unwrap().unwrap();
    assert_eq!(table.headers[0], "Date");
    assert_eq!(table.rows[0].day_of_week, "Mon");
    assert_eq!(table.rows[0].project_name, "Unknown project");
    assert_eq!(table.rows.last().unwrap().date, "Total");
}
