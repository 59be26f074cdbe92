use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Label set used for weekdays, headers and the sentinel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn weekday_label(&self, wd: Weekday) -> &'static str {
        const JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
        const EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

        let idx = wd.num_days_from_sunday() as usize;
        match self {
            Locale::Ja => JA[idx],
            Locale::En => EN[idx],
        }
    }

    /// Label shown in the date column of the totals row.
    pub fn total_label(&self) -> &'static str {
        match self {
            Locale::Ja => "合計",
            Locale::En => "Total",
        }
    }

    /// Placeholder used when an entry references a project id we don't know.
    pub fn unknown_project(&self) -> &'static str {
        match self {
            Locale::Ja => "プロジェクト不明",
            Locale::En => "Unknown project",
        }
    }

    pub fn headers(&self, show_description: bool) -> Vec<String> {
        let (base, description, tail): (&[&str], &str, &[&str]) = match self {
            Locale::Ja => (
                &["日付", "曜日", "プロジェクト"],
                "作業内容",
                &["出勤時刻", "退勤時刻", "労働時間", "労働時間(h)"],
            ),
            Locale::En => (
                &["Date", "Day", "Project"],
                "Description",
                &["Start", "End", "Hours", "Hours (h)"],
            ),
        };

        let mut headers: Vec<String> = base.iter().map(|h| h.to_string()).collect();
        if show_description {
            headers.push(description.to_string());
        }
        headers.extend(tail.iter().map(|h| h.to_string()));
        headers
    }

    /// Worksheet / cloud sheet title for a month.
    pub fn sheet_title(&self, year: i32, month: u32) -> String {
        match self {
            Locale::Ja => format!("{year}年{month}月勤務表"),
            Locale::En => format!("Timesheet {year}-{month:02}"),
        }
    }

    /// File name (without extension) used by the file renderers.
    pub fn file_stem(&self, year: i32, month: u32) -> String {
        match self {
            Locale::Ja => format!("勤務表_{year}年{month}月"),
            Locale::En => format!("timesheet_{year}-{month:02}"),
        }
    }
}
