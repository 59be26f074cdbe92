use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};

/// Last day of `month`, from calendar rules (leap years included).
pub fn month_last_day(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Weekday of a `YYYY-MM-DD` string; pure calendar arithmetic, no timezone involved.
pub fn weekday_of(date: &str) -> Option<Weekday> {
    parse_date(date).map(|d| d.weekday())
}

/// `YYYY-MM-DD` → `MM/DD`
pub fn display_date(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(m), Some(d)) => format!("{m}/{d}"),
        _ => date.to_string(),
    }
}

/// Parse the `--month` argument.
///
/// Supporta:
/// - M / MM        (year taken from `default_year`)
/// - YYYY-MM
pub fn parse_month_arg(s: &str, default_year: i32) -> AppResult<(i32, u32)> {
    let s = s.trim();

    let (year, month) = match s.split_once('-') {
        Some((y, m)) => {
            let y: i32 = y
                .parse()
                .map_err(|_| AppError::Config(format!("invalid year in '{s}'")))?;
            let m: u32 = m
                .parse()
                .map_err(|_| AppError::Config(format!("invalid month in '{s}'")))?;
            (y, m)
        }
        None => {
            let m: u32 = s
                .parse()
                .map_err(|_| AppError::Config(format!("invalid month '{s}'")))?;
            (default_year, m)
        }
    };

    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(month));
    }

    Ok((year, month))
}
