//! Month boundaries in UTC for a named timezone.
//!
//! Offsets come from the zone rules shipped with `chrono-tz`; the host's
//! local timezone is never consulted.

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an IANA zone identifier.
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// Zone offset (seconds east of UTC) in effect at `instant`.
fn offset_at(tz: Tz, instant: NaiveDateTime) -> i64 {
    tz.offset_from_utc_datetime(&instant).fix().local_minus_utc() as i64
}

/// Which reading to keep when a wall time occurs twice (fall-back).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    Earliest,
    Latest,
}

/// UTC instant of a local wall-clock time.
///
/// A wall time that occurs twice resolves to the reading picked by `which`.
/// A wall time inside a gap has no reading: the offset is taken at the
/// wall-clock value read as UTC, then re-derived at the resulting candidate,
/// and the later of the two candidates wins, so a skipped midnight maps to
/// the first instant of the day.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime, which: Occurrence) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(a, b) => {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            match which {
                Occurrence::Earliest => early.with_timezone(&Utc),
                Occurrence::Latest => late.with_timezone(&Utc),
            }
        }
        LocalResult::None => after_gap(tz, local),
    }
}

fn after_gap(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let first = offset_at(tz, local);
    let candidate = local - Duration::seconds(first);

    let second = offset_at(tz, candidate);
    let rederived = local - Duration::seconds(second);

    Utc.from_utc_datetime(&candidate.max(rederived))
}

/// First UTC instant whose local date is `date`.
pub fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, date.and_time(chrono::NaiveTime::MIN), Occurrence::Earliest)
}

/// `(00:00:00 local on day 1, 23:59:59 local on the last day)` as UTC instants.
pub fn resolve_month_bounds(
    year: i32,
    month: u32,
    timezone: &str,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let tz = parse_timezone(timezone)?;
    resolve_month_bounds_tz(year, month, tz)
}

pub fn resolve_month_bounds_tz(
    year: i32,
    month: u32,
    tz: Tz,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let last = month_last_day(year, month).ok_or(AppError::InvalidMonth(month))?;

    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or(AppError::InvalidMonth(month))?;
    let last_day = NaiveDate::from_ymd_opt(year, month, last).ok_or(AppError::InvalidMonth(month))?;

    let start = first_day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Other("invalid start of month".into()))?;
    let end = last_day
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| AppError::Other("invalid end of month".into()))?;

    // widest window: nothing local to the month falls outside it
    Ok((
        local_to_utc(tz, start, Occurrence::Earliest),
        local_to_utc(tz, end, Occurrence::Latest),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(dt: DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    #[test]
    fn tokyo_january() {
        let (s, e) = resolve_month_bounds(2024, 1, "Asia/Tokyo").unwrap();
        assert_eq!(iso(s), "2023-12-31T15:00:00.000Z");
        assert_eq!(iso(e), "2024-01-31T14:59:59.000Z");
    }

    #[test]
    fn tokyo_december() {
        let (s, e) = resolve_month_bounds(2024, 12, "Asia/Tokyo").unwrap();
        assert_eq!(iso(s), "2024-11-30T15:00:00.000Z");
        assert_eq!(iso(e), "2024-12-31T14:59:59.000Z");
    }

    #[test]
    fn utc_has_no_offset() {
        let (s, _) = resolve_month_bounds(2024, 1, "UTC").unwrap();
        assert_eq!(iso(s), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn new_york_winter_and_summer() {
        let (jan, _) = resolve_month_bounds(2024, 1, "America/New_York").unwrap();
        assert_eq!(iso(jan), "2024-01-01T05:00:00.000Z");

        let (jul, _) = resolve_month_bounds(2024, 7, "America/New_York").unwrap();
        assert_eq!(iso(jul), "2024-07-01T04:00:00.000Z");
    }

    #[test]
    fn month_straddling_dst_change_uses_offset_at_each_end() {
        // March 2024: EST at the start, EDT at the end
        let (s, e) = resolve_month_bounds(2024, 3, "America/New_York").unwrap();
        assert_eq!(iso(s), "2024-03-01T05:00:00.000Z");
        assert_eq!(iso(e), "2024-04-01T03:59:59.000Z");

        // October 2024 in Berlin: CEST at the start, CET at the end
        let (s, e) = resolve_month_bounds(2024, 10, "Europe/Berlin").unwrap();
        assert_eq!(iso(s), "2024-09-30T22:00:00.000Z");
        assert_eq!(iso(e), "2024-10-31T22:59:59.000Z");
    }

    #[test]
    fn leap_february_spans_29_days() {
        let (s, e) = resolve_month_bounds(2024, 2, "Asia/Tokyo").unwrap();
        assert_eq!((e - s).num_seconds(), 29 * 86_400 - 1);
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            resolve_month_bounds(2024, 1, "Mars/Olympus"),
            Err(AppError::InvalidTimezone(_))
        ));
        assert!(matches!(
            resolve_month_bounds(2024, 0, "UTC"),
            Err(AppError::InvalidMonth(0))
        ));
        assert!(matches!(
            resolve_month_bounds(2024, 13, "UTC"),
            Err(AppError::InvalidMonth(13))
        ));
    }

    #[test]
    fn midnight_inside_dst_gap_maps_to_first_valid_instant() {
        // Santiago springs forward at 00:00 local on 2024-09-08 (→ 01:00)
        let tz: Tz = "America/Santiago".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let m = local_midnight(tz, date);
        assert_eq!(iso(m), "2024-09-08T04:00:00.000Z");
    }

    #[test]
    fn repeated_midnight_resolves_to_first_occurrence() {
        // Amman fell back from 01:00 to 00:00 on 2021-10-29 (+03 → +02)
        let tz: Tz = "Asia/Amman".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2021, 10, 29).unwrap();
        assert_eq!(iso(local_midnight(tz, date)), "2021-10-28T21:00:00.000Z");

        let naive = date.and_hms_opt(0, 30, 0).unwrap();
        assert_eq!(
            iso(local_to_utc(tz, naive, Occurrence::Latest)),
            "2021-10-28T22:30:00.000Z"
        );
    }
}
