//! Time utilities: wall-clock formatting, `HH:MM` ordering, hour formatting.

use chrono::{NaiveTime, Timelike};

/// `HH:MM`, zero padded, seconds dropped.
pub fn format_clock(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Minutes since midnight of an `H:MM` / `HH:MM` string.
///
/// Accepts the `24:00` end-of-day sentinel (→ 1440). Unparseable values sort last.
pub fn minutes_of_day(s: &str) -> u32 {
    let Some((h, m)) = s.split_once(':') else {
        return u32::MAX;
    };
    match (h.trim().parse::<u32>(), m.trim().parse::<u32>()) {
        (Ok(h), Ok(m)) => h * 60 + m,
        _ => u32::MAX,
    }
}

/// `H:MM`, rounded to the nearest minute.
pub fn format_hours_hmm(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{}:{:02}", sign, m / 60, m % 60)
}

/// Fixed two decimals.
pub fn format_hours_decimal(hours: f64) -> String {
    format!("{:.2}", hours)
}
