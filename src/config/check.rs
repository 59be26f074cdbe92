//! Sanity checks for `config --check` and before talking to remote services.

use super::Config;
use crate::core::parse_timezone;
use crate::errors::{AppError, AppResult};
use crate::export::OutputFormat;

/// Human-readable list of problems; empty when the config is usable.
pub fn problems(cfg: &Config) -> Vec<String> {
    let mut out = Vec::new();

    if cfg.clockify.api_key.trim().is_empty() {
        out.push("clockify.api_key is missing (or set CLOCKIFY_API_KEY)".to_string());
    }
    if cfg.clockify.workspace_id.trim().is_empty() {
        out.push("clockify.workspace_id is missing (or set CLOCKIFY_WORKSPACE_ID)".to_string());
    }
    if cfg.clockify.user_id.trim().is_empty() {
        out.push("clockify.user_id is missing (or set CLOCKIFY_USER_ID)".to_string());
    }
    if parse_timezone(&cfg.timezone).is_err() {
        out.push(format!("timezone '{}' is not a valid IANA zone", cfg.timezone));
    }

    for (name, value) in [
        ("excel.header_color", Some(&cfg.excel.header_color)),
        ("excel.alternate_row_color", cfg.excel.alternate_row_color.as_ref()),
        (
            "excel.date_group_border.color",
            Some(&cfg.excel.date_group_border.color),
        ),
    ] {
        if let Some(v) = value
            && parse_hex_color(v).is_none()
        {
            out.push(format!("{name} '{v}' is not a 6-digit hex color"));
        }
    }

    if cfg.output_format == OutputFormat::Sheets {
        match &cfg.google_sheets {
            None => out.push("google_sheets section is required for the sheets format".to_string()),
            Some(gs) => {
                if gs.spreadsheet_id.trim().is_empty() {
                    out.push("google_sheets.spreadsheet_id is missing".to_string());
                }
                if gs.access_token.trim().is_empty() {
                    out.push(
                        "google_sheets.access_token is missing (or set GOOGLE_SHEETS_ACCESS_TOKEN)"
                            .to_string(),
                    );
                }
            }
        }
    }

    out
}

/// Clockify credentials only; used before every remote call.
pub fn require_clockify(cfg: &Config, need_workspace: bool, need_user: bool) -> AppResult<()> {
    let c = &cfg.clockify;
    let mut missing = Vec::new();

    if c.api_key.trim().is_empty() {
        missing.push("CLOCKIFY_API_KEY");
    }
    if need_workspace && c.workspace_id.trim().is_empty() {
        missing.push("CLOCKIFY_WORKSPACE_ID");
    }
    if need_user && c.user_id.trim().is_empty() {
        missing.push("CLOCKIFY_USER_ID");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Clockify configuration is incomplete, set: {}",
            missing.join(", ")
        )))
    }
}

/// `RRGGBB` (optional leading `#`) → 0xRRGGBB
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoogleSheetsConfig;

    fn complete() -> Config {
        let mut cfg = Config::default();
        cfg.clockify.api_key = "k".into();
        cfg.clockify.workspace_id = "w".into();
        cfg.clockify.user_id = "u".into();
        cfg
    }

    #[test]
    fn default_config_misses_credentials() {
        let p = problems(&Config::default());
        assert_eq!(p.len(), 3);
        assert!(p[0].contains("api_key"));
    }

    #[test]
    fn complete_config_has_no_problems() {
        assert!(problems(&complete()).is_empty());
        assert!(require_clockify(&complete(), true, true).is_ok());
    }

    #[test]
    fn bad_color_and_timezone_are_reported() {
        let mut cfg = complete();
        cfg.timezone = "Atlantis/Capital".into();
        cfg.excel.header_color = "blue".into();

        let p = problems(&cfg);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn sheets_format_needs_target() {
        let mut cfg = complete();
        cfg.output_format = OutputFormat::Sheets;
        assert_eq!(problems(&cfg).len(), 1);

        cfg.google_sheets = Some(GoogleSheetsConfig {
            spreadsheet_id: "sheet".into(),
            access_token: "tok".into(),
        });
        assert!(problems(&cfg).is_empty());
    }

    #[test]
    fn require_clockify_names_missing_variables() {
        let mut cfg = complete();
        cfg.clockify.user_id.clear();

        assert!(require_clockify(&cfg, true, false).is_ok());
        let err = require_clockify(&cfg, true, true).unwrap_err().to_string();
        assert!(err.contains("CLOCKIFY_USER_ID"));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("4472C4"), Some(0x4472C4));
        assert_eq!(parse_hex_color("#ffffff"), Some(0xFFFFFF));
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }
}
