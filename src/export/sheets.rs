// src/export/sheets.rs

use crate::config::check::parse_hex_color;
use crate::config::{ExcelSettings, GoogleSheetsConfig};
use crate::errors::{AppError, AppResult};
use crate::export::Renderer;
use crate::http::{TIMEOUT, ensure_success};
use crate::models::{Locale, TimesheetTable};
use crate::ui::messages::{info, success};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Value>,
}

/// Google Sheets renderer. Writes the month into its own tab.
pub struct CloudSheetRenderer {
    http: reqwest::Client,
    spreadsheet_id: String,
    base_url: String,
    locale: Locale,
    settings: ExcelSettings,
}

impl CloudSheetRenderer {
    pub fn new(cfg: GoogleSheetsConfig, locale: Locale, settings: ExcelSettings) -> AppResult<Self> {
        Self::with_base_url(cfg, locale, settings, SHEETS_API)
    }

    pub fn with_base_url(
        cfg: GoogleSheetsConfig,
        locale: Locale,
        settings: ExcelSettings,
        base_url: &str,
    ) -> AppResult<Self> {
        if cfg.spreadsheet_id.trim().is_empty() {
            return Err(AppError::Config(
                "google_sheets.spreadsheet_id is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", cfg.access_token))
            .map_err(|e| AppError::Config(format!("invalid google_sheets.access_token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            spreadsheet_id: cfg.spreadsheet_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale,
            settings,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, self.spreadsheet_id, suffix)
    }

    async fn find_sheet(&self, title: &str) -> AppResult<Option<i64>> {
        let resp = self
            .http
            .get(self.url(""))
            .query(&[("fields", "sheets.properties(sheetId,title)")])
            .send()
            .await?;
        let meta: SpreadsheetMeta = ensure_success(resp).await?.json().await?;

        Ok(meta
            .sheets
            .into_iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id))
    }

    async fn clear_sheet(&self, title: &str) -> AppResult<()> {
        let range = urlencoding::encode(&format!("'{title}'!A:Z")).into_owned();
        let resp = self
            .http
            .post(self.url(&format!("/values/{range}:clear")))
            .json(&json!({}))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn batch_update(&self, requests: Vec<Value>) -> AppResult<BatchUpdateResponse> {
        let resp = self
            .http
            .post(self.url(":batchUpdate"))
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    async fn add_sheet(&self, title: &str) -> AppResult<i64> {
        let reply = self
            .batch_update(vec![json!({ "addSheet": { "properties": { "title": title } } })])
            .await?;

        reply
            .replies
            .first()
            .and_then(|r| r["addSheet"]["properties"]["sheetId"].as_i64())
            .ok_or_else(|| AppError::Export("addSheet reply without sheetId".to_string()))
    }

    async fn write_values(&self, title: &str, values: Vec<Vec<String>>) -> AppResult<()> {
        let range = urlencoding::encode(&format!("'{title}'!A1")).into_owned();
        let resp = self
            .http
            .put(self.url(&format!("/values/{range}")))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": values }))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for CloudSheetRenderer {
    async fn render(&self, table: &TimesheetTable) -> AppResult<String> {
        let title = self.locale.sheet_title(table.year, table.month);
        info(format!("Exporting to Google Sheets: {title}"));

        let sheet_id = match self.find_sheet(&title).await? {
            Some(id) => {
                debug!(sheet_id = id, "clearing existing sheet");
                self.clear_sheet(&title).await?;
                id
            }
            None => self.add_sheet(&title).await?,
        };

        self.write_values(&title, table.to_matrix()).await?;

        let requests = format_requests(sheet_id, table, &self.settings);
        if !requests.is_empty() {
            self.batch_update(requests).await?;
        }

        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/edit#gid={}",
            self.spreadsheet_id, sheet_id
        );
        success(format!("Google Sheets export completed: {url}"));
        Ok(url)
    }
}

/// `RRGGBB` → Sheets color object (components in 0..=1).
fn rgb(hex: &str) -> Value {
    let v = parse_hex_color(hex).unwrap_or(0);
    json!({
        "red": ((v >> 16) & 0xFF) as f64 / 255.0,
        "green": ((v >> 8) & 0xFF) as f64 / 255.0,
        "blue": (v & 0xFF) as f64 / 255.0,
    })
}

fn grid(sheet_id: i64, rows: (usize, usize), cols: usize) -> Value {
    json!({
        "sheetId": sheet_id,
        "startRowIndex": rows.0,
        "endRowIndex": rows.1,
        "startColumnIndex": 0,
        "endColumnIndex": cols,
    })
}

/// Formatting requests for one `batchUpdate`: header, alignment, totals,
/// column widths, borders, alternate group fill.
pub fn format_requests(sheet_id: i64, table: &TimesheetTable, settings: &ExcelSettings) -> Vec<Value> {
    let cols = table.headers.len();
    // +1 for the header row
    let row_count = table.rows.len() + 1;
    let mut requests = Vec::new();

    requests.push(json!({
        "repeatCell": {
            "range": grid(sheet_id, (0, 1), cols),
            "cell": { "userEnteredFormat": {
                "backgroundColor": rgb(&settings.header_color),
                "textFormat": { "bold": true, "foregroundColor": { "red": 1, "green": 1, "blue": 1 } },
                "horizontalAlignment": "CENTER",
                "verticalAlignment": "MIDDLE",
            }},
            "fields": "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment,verticalAlignment)",
        }
    }));

    requests.push(json!({
        "repeatCell": {
            "range": grid(sheet_id, (1, row_count), cols),
            "cell": { "userEnteredFormat": {
                "horizontalAlignment": "CENTER",
                "verticalAlignment": "MIDDLE",
            }},
            "fields": "userEnteredFormat(horizontalAlignment,verticalAlignment)",
        }
    }));

    requests.push(json!({
        "repeatCell": {
            "range": grid(sheet_id, (row_count - 1, row_count), cols),
            "cell": { "userEnteredFormat": { "textFormat": { "bold": true } } },
            "fields": "userEnteredFormat(textFormat)",
        }
    }));

    let mut widths = vec![80, 50, 150];
    if table.show_description {
        widths.push(200);
    }
    widths.extend([80, 80, 80, 80]);

    for (i, px) in widths.into_iter().enumerate() {
        requests.push(json!({
            "updateDimensionProperties": {
                "range": {
                    "sheetId": sheet_id,
                    "dimension": "COLUMNS",
                    "startIndex": i,
                    "endIndex": i + 1,
                },
                "properties": { "pixelSize": px },
                "fields": "pixelSize",
            }
        }));
    }

    let solid = json!({ "style": "SOLID", "color": { "red": 0, "green": 0, "blue": 0 } });
    requests.push(json!({
        "updateBorders": {
            "range": grid(sheet_id, (0, row_count), cols),
            "top": solid,
            "bottom": solid,
            "left": solid,
            "right": solid,
            "innerHorizontal": solid,
            "innerVertical": solid,
        }
    }));

    if let Some(alt) = settings.alternate_row_color.as_deref() {
        for (first, last) in table.group_ranges() {
            let odd = table.rows[first].date_group_index.is_some_and(|g| g % 2 == 1);
            if !odd {
                continue;
            }
            // table row i sits on sheet row i + 1
            requests.push(json!({
                "repeatCell": {
                    "range": grid(sheet_id, (first + 1, last + 2), cols),
                    "cell": { "userEnteredFormat": { "backgroundColor": rgb(alt) } },
                    "fields": "userEnteredFormat(backgroundColor)",
                }
            }));
        }
    }

    requests
}
