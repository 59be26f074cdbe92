// src/export/xlsx.rs

use crate::config::check::parse_hex_color;
use crate::config::{BorderStyle, ExcelSettings};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{Overwrite, ensure_writable, output_path};
use crate::export::{Renderer, notify_export_success, run_blocking};
use crate::models::{Locale, TimesheetRow, TimesheetTable};
use crate::ui::messages::info;
use async_trait::async_trait;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::{Path, PathBuf};

const BLACK: Color = Color::RGB(0x000000);
const WHITE: Color = Color::RGB(0xFFFFFF);

/// Column widths: date, weekday, project, [description], start, end, h:mm, hours.
fn column_widths(show_description: bool) -> Vec<f64> {
    let mut w = vec![10.0, 6.0, 20.0];
    if show_description {
        w.push(30.0);
    }
    w.extend([12.0, 12.0, 12.0, 12.0]);
    w
}

fn border(style: BorderStyle) -> FormatBorder {
    match style {
        BorderStyle::Thin => FormatBorder::Thin,
        BorderStyle::Medium => FormatBorder::Medium,
        BorderStyle::Thick => FormatBorder::Thick,
    }
}

fn color(hex: &str) -> Color {
    Color::RGB(parse_hex_color(hex).unwrap_or(0x000000))
}

/// Which edges of a cell get the heavier date-group border.
#[derive(Clone, Copy)]
struct Edges {
    top: bool,
    bottom: bool,
}

/// Excel renderer: one sheet per month, rows grouped by day.
#[derive(Debug, Clone)]
pub struct SpreadsheetRenderer {
    output_dir: PathBuf,
    locale: Locale,
    settings: ExcelSettings,
    overwrite: Overwrite,
}

impl SpreadsheetRenderer {
    pub fn new(
        output_dir: &Path,
        locale: Locale,
        settings: ExcelSettings,
        overwrite: Overwrite,
    ) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            locale,
            settings,
            overwrite,
        }
    }

    /// Base cell format: font, centered, base borders, optional fill and
    /// heavier top/bottom edges.
    fn cell_format(&self, fill: Option<Color>, edges: Edges) -> Format {
        let s = &self.settings;
        let base = border(s.border_style);
        let group = border(s.date_group_border.style);
        let group_color = color(&s.date_group_border.color);

        let mut fmt = Format::new()
            .set_font_name(s.font_name.as_str())
            .set_font_size(s.font_size)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(base)
            .set_border_color(BLACK);

        if let Some(bg) = fill {
            fmt = fmt.set_background_color(bg).set_pattern(FormatPattern::Solid);
        }
        if edges.top {
            fmt = fmt.set_border_top(group).set_border_top_color(group_color);
        }
        if edges.bottom {
            fmt = fmt.set_border_bottom(group).set_border_bottom_color(group_color);
        }
        fmt
    }

    fn header_format(&self) -> Format {
        self.cell_format(
            Some(color(&self.settings.header_color)),
            Edges {
                top: true,
                bottom: true,
            },
        )
        .set_bold()
        .set_font_color(WHITE)
    }

    /// Write one table row; the last column is written as a number.
    fn write_row(
        ws: &mut Worksheet,
        xl_row: u32,
        values: &[String],
        fmt: &Format,
    ) -> AppResult<()> {
        let last = values.len().saturating_sub(1);

        for (col, v) in values.iter().enumerate() {
            let col_u16 = col as u16;
            if v.is_empty() {
                ws.write_blank(xl_row, col_u16, fmt).map_err(to_export_error)?;
                continue;
            }
            if col == last
                && let Ok(num) = v.parse::<f64>()
            {
                let num_fmt = fmt.clone().set_num_format("0.00");
                ws.write_with_format(xl_row, col_u16, num, &num_fmt)
                    .map_err(to_export_error)?;
                continue;
            }
            ws.write_with_format(xl_row, col_u16, v.as_str(), fmt)
                .map_err(to_export_error)?;
        }
        Ok(())
    }

    fn group_fill(&self, row: &TimesheetRow) -> Option<Color> {
        let alt = self.settings.alternate_row_color.as_deref()?;
        match row.date_group_index {
            Some(g) if g % 2 == 1 => Some(color(alt)),
            _ => None,
        }
    }

    pub fn write_workbook(&self, table: &TimesheetTable, path: &Path) -> AppResult<()> {
        let mut workbook = Workbook::new();

        {
            let ws = workbook.add_worksheet();
            ws.set_name(self.locale.sheet_title(table.year, table.month))
                .map_err(to_export_error)?;

            // ---------------------------
            // Header
            // ---------------------------
            let header_fmt = self.header_format();
            for (col, h) in table.headers.iter().enumerate() {
                ws.write_with_format(0, col as u16, h.as_str(), &header_fmt)
                    .map_err(to_export_error)?;
            }
            ws.set_freeze_panes(1, 0).map_err(to_export_error)?;

            // ---------------------------
            // Righe per gruppo di data
            // ---------------------------
            for (first, last) in table.group_ranges() {
                for idx in first..=last {
                    let row = &table.rows[idx];
                    let fmt = self.cell_format(
                        self.group_fill(row),
                        Edges {
                            top: idx == first,
                            bottom: idx == last,
                        },
                    );
                    Self::write_row(ws, idx as u32 + 1, &table.row_values(row), &fmt)?;
                }
            }

            // ---------------------------
            // Totale
            // ---------------------------
            let total_fmt = self
                .cell_format(
                    None,
                    Edges {
                        top: true,
                        bottom: true,
                    },
                )
                .set_bold();
            for (idx, row) in table.rows.iter().enumerate().filter(|(_, r)| r.is_total) {
                Self::write_row(ws, idx as u32 + 1, &table.row_values(row), &total_fmt)?;
            }

            for (col, width) in column_widths(table.show_description).into_iter().enumerate() {
                ws.set_column_width(col as u16, width)
                    .map_err(to_export_error)?;
            }
        }

        workbook.save(path).map_err(to_export_error)?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for SpreadsheetRenderer {
    async fn render(&self, table: &TimesheetTable) -> AppResult<String> {
        let renderer = self.clone();
        let table = table.clone();

        run_blocking(move || {
            let stem = renderer.locale.file_stem(table.year, table.month);
            let path = output_path(&renderer.output_dir, &stem, "xlsx")?;
            ensure_writable(&path, renderer.overwrite)?;

            info(format!("Exporting to XLSX: {}", path.display()));
            renderer.write_workbook(&table, &path)?;

            notify_export_success("XLSX", &path);
            Ok(path.display().to_string())
        })
        .await
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
