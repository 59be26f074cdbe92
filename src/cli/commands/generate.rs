use crate::cli::parser::Commands;
use crate::clockify::ClockifyClient;
use crate::config::{Config, check};
use crate::core::TimesheetService;
use crate::errors::{AppError, AppResult};
use crate::export::{Overwrite, RenderTarget, create_renderer};
use crate::utils::date::parse_month_arg;
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use std::io::IsTerminal;
use std::path::PathBuf;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Generate {
        year,
        month,
        format,
        output_dir,
        description,
        tz,
        force,
    } = cmd
    else {
        return Ok(());
    };

    // CLI overrides on a private copy
    let mut cfg = cfg.clone();
    if let Some(zone) = tz {
        cfg.timezone = zone.clone();
    }
    if *description {
        cfg.show_description = true;
    }
    if let Some(f) = format {
        cfg.output_format = *f;
    }

    let options = cfg.timesheet_options()?;
    let (year, month) = target_month(*year, month.as_deref(), options.timezone)?;

    check::require_clockify(&cfg, true, true)?;
    let client = ClockifyClient::new(&cfg.clockify)?;

    let overwrite = if *force {
        Overwrite::Always
    } else if std::io::stdin().is_terminal() {
        Overwrite::Prompt
    } else {
        Overwrite::Never
    };
    let target = RenderTarget {
        format: cfg.output_format,
        output_dir: output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.output_dir)),
        overwrite,
    };
    let renderer = create_renderer(&cfg, &target)?;

    let service = TimesheetService::new(&client, &*renderer, options);
    service.generate_monthly(year, month).await?;
    Ok(())
}

/// Month selection: `--month YYYY-MM`, `--month M [--year Y]`, or the
/// current month in `tz`.
pub fn target_month(year: Option<i32>, month: Option<&str>, tz: Tz) -> AppResult<(i32, u32)> {
    let today = Utc::now().with_timezone(&tz).date_naive();
    let default_year = year.unwrap_or(today.year());

    match month {
        Some(m) => {
            let (y, m) = parse_month_arg(m, default_year)?;
            if let Some(explicit) = year
                && explicit != y
            {
                return Err(AppError::Other(format!(
                    "--year {explicit} conflicts with --month {y}-{m:02}"
                )));
            }
            Ok((y, m))
        }
        None => Ok((default_year, today.month())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_month_and_year() {
        assert_eq!(target_month(Some(2023), Some("2"), Tz::UTC).unwrap(), (2023, 2));
        assert_eq!(target_month(None, Some("2024-11"), Tz::UTC).unwrap(), (2024, 11));
    }

    #[test]
    fn conflicting_year_is_rejected() {
        assert!(target_month(Some(2023), Some("2024-01"), Tz::UTC).is_err());
    }

    #[test]
    fn default_is_current_month_in_zone() {
        let now = Utc::now().with_timezone(&Tz::Asia__Tokyo).date_naive();
        assert_eq!(
            target_month(None, None, Tz::Asia__Tokyo).unwrap(),
            (now.year(), now.month())
        );
    }
}
