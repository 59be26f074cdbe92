//! Flattens WorkDays into the sink-agnostic timesheet table.

use crate::models::{Locale, TimesheetRow, TimesheetTable, WorkDay};
use crate::utils::date::display_date;
use crate::utils::time::{format_hours_decimal, format_hours_hmm};

#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub show_description: bool,
    pub locale: Locale,
}

pub fn build(work_days: &[WorkDay], year: i32, month: u32, options: TableOptions) -> TimesheetTable {
    let headers = options.locale.headers(options.show_description);
    let mut rows: Vec<TimesheetRow> = Vec::new();
    let mut total_hours = 0.0_f64;
    let mut date_group_index = 0usize;

    for work_day in work_days {
        if work_day.sessions.is_empty() {
            continue;
        }

        for (i, session) in work_day.sessions.iter().enumerate() {
            let first = i == 0;

            rows.push(TimesheetRow {
                date: if first {
                    display_date(&session.date)
                } else {
                    String::new()
                },
                day_of_week: if first {
                    work_day.day_of_week.clone()
                } else {
                    String::new()
                },
                project_name: session.project_name.clone(),
                description: session.description.clone(),
                start_time: session.start_time.clone(),
                end_time: session.end_time.clone(),
                work_hours_formatted: format_hours_hmm(session.work_hours),
                work_hours_decimal: format_hours_decimal(session.work_hours),
                work_hours: session.work_hours,
                is_total: false,
                date_group_index: Some(date_group_index),
            });

            total_hours += session.work_hours;
        }

        date_group_index += 1;
    }

    // Riga totale
    rows.push(TimesheetRow {
        date: options.locale.total_label().to_string(),
        day_of_week: String::new(),
        project_name: String::new(),
        description: String::new(),
        start_time: String::new(),
        end_time: String::new(),
        work_hours_formatted: format_hours_hmm(total_hours),
        work_hours_decimal: format_hours_decimal(total_hours),
        work_hours: total_hours,
        is_total: true,
        date_group_index: None,
    });

    TimesheetTable {
        headers,
        rows,
        total_hours,
        work_day_count: date_group_index,
        year,
        month,
        show_description: options.show_description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Session;

    fn session(date: &str, start: &str, end: &str, hours: f64) -> Session {
        Session {
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
            work_hours: hours,
            project_name: "Alpha".into(),
            description: "docs, review".into(),
        }
    }

    fn day(date: &str, dow: &str, sessions: Vec<Session>) -> WorkDay {
        WorkDay {
            date: date.into(),
            day_of_week: dow.into(),
            sessions,
        }
    }

    fn opts(show_description: bool) -> TableOptions {
        TableOptions {
            show_description,
            locale: Locale::Ja,
        }
    }

    fn sample_days() -> Vec<WorkDay> {
        vec![
            day(
                "2024-01-15",
                "月",
                vec![
                    session("2024-01-15", "09:00", "12:00", 3.0),
                    session("2024-01-15", "23:30", "24:00", 0.5),
                ],
            ),
            day("2024-01-16", "火", vec![]),
            day(
                "2024-01-17",
                "水",
                vec![session("2024-01-17", "0:00", "00:30", 0.5)],
            ),
        ]
    }

    #[test]
    fn first_row_of_a_day_carries_date_and_weekday() {
        let table = build(&sample_days(), 2024, 1, opts(false));

        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].date, "01/15");
        assert_eq!(table.rows[0].day_of_week, "月");
        assert_eq!(table.rows[1].date, "");
        assert_eq!(table.rows[1].day_of_week, "");
        assert!(table.rows[1].is_continuation());
        assert_eq!(table.rows[2].date, "01/17");
    }

    #[test]
    fn group_index_is_per_day_and_skips_empty_days() {
        let table = build(&sample_days(), 2024, 1, opts(false));

        let groups: Vec<Option<usize>> = table.rows.iter().map(|r| r.date_group_index).collect();
        assert_eq!(groups, vec![Some(0), Some(0), Some(1), None]);
        assert_eq!(table.work_day_count, 2);
        assert_eq!(table.group_ranges(), vec![(0, 1), (2, 2)]);
    }

    #[test]
    fn totals_row_matches_sum_of_rows() {
        let table = build(&sample_days(), 2024, 1, opts(false));

        let total = table.rows.last().unwrap();
        assert!(total.is_total);
        assert_eq!(total.date, "合計");
        assert_eq!(total.project_name, "");
        assert_eq!(total.work_hours_formatted, "4:00");
        assert_eq!(total.work_hours_decimal, "4.00");

        let sum: f64 = table.data_rows().map(|r| r.work_hours).sum();
        assert!((table.total_hours - sum).abs() < 1e-9);
        let printed: f64 = total.work_hours_decimal.parse().unwrap();
        assert!((printed - table.total_hours).abs() <= 0.01);
    }

    #[test]
    fn description_column_is_optional() {
        let without = build(&sample_days(), 2024, 1, opts(false));
        let with = build(&sample_days(), 2024, 1, opts(true));

        assert_eq!(without.headers.len(), 7);
        assert_eq!(with.headers.len(), 8);

        let values = with.row_values(&with.rows[0]);
        assert_eq!(values.len(), 8);
        assert_eq!(values[3], "docs, review");
        assert_eq!(without.row_values(&without.rows[0]).len(), 7);
    }

    #[test]
    fn both_hour_formats_come_from_one_value() {
        let days = vec![day(
            "2024-01-15",
            "月",
            vec![session("2024-01-15", "09:00", "09:20", 20.0 / 60.0)],
        )];
        let table = build(&days, 2024, 1, opts(false));

        assert_eq!(table.rows[0].work_hours_formatted, "0:20");
        assert_eq!(table.rows[0].work_hours_decimal, "0.33");
    }

    #[test]
    fn empty_input_has_only_totals_row() {
        let table = build(&[], 2024, 2, opts(false));

        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].is_total);
        assert_eq!(table.rows[0].work_hours_decimal, "0.00");
        assert_eq!(table.rows[0].work_hours_formatted, "0:00");
        assert_eq!(table.work_day_count, 0);
        assert_eq!(table.total_hours, 0.0);
        assert!(table.group_ranges().is_empty());
    }
}
