use crate::core::{MalformedPolicy, TimesheetOptions, parse_timezone};
use crate::errors::{AppError, AppResult};
use crate::export::OutputFormat;
use crate::models::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod check;

pub const DEFAULT_BASE_URL: &str = "https://api.clockify.me/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub show_description: bool,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clockify: ClockifyConfig,
    #[serde(default)]
    pub excel: ExcelSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_sheets: Option<GoogleSheetsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockifyConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Thin,
    Medium,
    Thick,
}

impl BorderStyle {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "thin" => Some(BorderStyle::Thin),
            "medium" => Some(BorderStyle::Medium),
            "thick" => Some(BorderStyle::Thick),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateGroupBorder {
    pub style: BorderStyle,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelSettings {
    /// hex RGB, e.g. `4472C4`
    pub header_color: String,
    pub alternate_row_color: Option<String>,
    pub border_style: BorderStyle,
    pub font_size: u32,
    pub font_name: String,
    pub date_group_border: DateGroupBorder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSheetsConfig {
    pub spreadsheet_id: String,
    /// OAuth bearer token with the spreadsheets scope.
    #[serde(default)]
    pub access_token: String,
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}
fn default_output_dir() -> String {
    ".".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClockifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            workspace_id: String::new(),
            user_id: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Default for ExcelSettings {
    fn default() -> Self {
        Self {
            header_color: "4472C4".to_string(),
            alternate_row_color: Some("F2F2F2".to_string()),
            border_style: BorderStyle::Thin,
            font_size: 11,
            font_name: "Meiryo UI".to_string(),
            date_group_border: DateGroupBorder::default(),
        }
    }
}

impl Default for DateGroupBorder {
    fn default() -> Self {
        Self {
            style: BorderStyle::Medium,
            color: "333333".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            locale: Locale::default(),
            output_format: OutputFormat::default(),
            output_dir: default_output_dir(),
            show_description: false,
            on_malformed: MalformedPolicy::default(),
            log_level: default_log_level(),
            clockify: ClockifyConfig::default(),
            excel: ExcelSettings::default(),
            google_sheets: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".clockify-timesheet")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("clockify-timesheet.conf")
    }

    /// Load configuration from `path` (or the default file), then apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut cfg = Self::load_file(path)?;
        cfg.apply_env(|key| env::var(key).ok());
        Ok(cfg)
    }

    /// File only, no environment.
    pub fn load_file(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        }

        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| AppError::ConfigSave(e.to_string()))
    }

    /// Environment overrides. `lookup` is `env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CLOCKIFY_API_KEY") {
            self.clockify.api_key = v;
        }
        if let Some(v) = get("CLOCKIFY_WORKSPACE_ID") {
            self.clockify.workspace_id = v;
        }
        if let Some(v) = get("CLOCKIFY_USER_ID") {
            self.clockify.user_id = v;
        }
        if let Some(v) = get("TIMEZONE") {
            self.timezone = v;
        }

        // Excel
        if let Some(v) = get("EXCEL_HEADER_COLOR") {
            self.excel.header_color = v;
        }
        if let Some(v) = get("EXCEL_ALTERNATE_ROW_COLOR") {
            self.excel.alternate_row_color = Some(v);
        }
        if let Some(style) = get("EXCEL_BORDER_STYLE").and_then(|v| BorderStyle::from_code(&v)) {
            self.excel.border_style = style;
        }
        if let Some(size) = get("EXCEL_FONT_SIZE").and_then(|v| v.trim().parse::<u32>().ok()) {
            self.excel.font_size = size;
        }
        if let Some(v) = get("EXCEL_FONT_NAME") {
            self.excel.font_name = v;
        }
        if let Some(style) =
            get("EXCEL_DATE_BORDER_STYLE").and_then(|v| BorderStyle::from_code(&v))
        {
            self.excel.date_group_border.style = style;
        }
        if let Some(v) = get("EXCEL_DATE_BORDER_COLOR") {
            self.excel.date_group_border.color = v;
        }

        // Google Sheets
        let sheet_id = get("GOOGLE_SHEETS_SPREADSHEET_ID");
        let token = get("GOOGLE_SHEETS_ACCESS_TOKEN");
        if sheet_id.is_some() || token.is_some() {
            let sheets = self.google_sheets.get_or_insert_with(|| GoogleSheetsConfig {
                spreadsheet_id: String::new(),
                access_token: String::new(),
            });
            if let Some(v) = sheet_id {
                sheets.spreadsheet_id = v;
            }
            if let Some(v) = token {
                sheets.access_token = v;
            }
        }
    }

    /// Options for the reconciliation pipeline; fails on an unknown timezone.
    pub fn timesheet_options(&self) -> AppResult<TimesheetOptions> {
        Ok(TimesheetOptions {
            timezone: parse_timezone(&self.timezone)?,
            locale: self.locale,
            show_description: self.show_description,
            malformed: self.on_malformed,
        })
    }

    /// Copy with secrets masked, for `config --print`.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.clockify.api_key = mask(&copy.clockify.api_key);
        if let Some(sheets) = copy.google_sheets.as_mut() {
            sheets.access_token = mask(&sheets.access_token);
        }
        copy
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}
