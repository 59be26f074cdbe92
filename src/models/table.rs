use serde::Serialize;

/// Rendering-ready flattened record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetRow {
    /// `MM/DD` on the first row of a day, empty on the following ones.
    pub date: String,
    pub day_of_week: String,
    pub project_name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    /// `H:MM`
    pub work_hours_formatted: String,
    /// two decimals
    pub work_hours_decimal: String,
    #[serde(skip)]
    pub work_hours: f64,
    pub is_total: bool,
    /// Shared by every row of one WorkDay; `None` on the totals row.
    pub date_group_index: Option<usize>,
}

impl TimesheetRow {
    /// Blank date cell → same day as the row above.
    pub fn is_continuation(&self) -> bool {
        !self.is_total && self.date.is_empty()
    }
}

/// The sole artifact handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<TimesheetRow>,
    pub total_hours: f64,
    pub work_day_count: usize,
    pub year: i32,
    pub month: u32,
    pub show_description: bool,
}

impl TimesheetTable {
    /// Cell values of a row, in header order.
    pub fn row_values(&self, row: &TimesheetRow) -> Vec<String> {
        let mut values = vec![
            row.date.clone(),
            row.day_of_week.clone(),
            row.project_name.clone(),
        ];
        if self.show_description {
            values.push(row.description.clone());
        }
        values.extend([
            row.start_time.clone(),
            row.end_time.clone(),
            row.work_hours_formatted.clone(),
            row.work_hours_decimal.clone(),
        ]);
        values
    }

    /// Header + rows as a plain string matrix (csv / cloud sheet).
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.headers.clone());
        out.extend(self.rows.iter().map(|r| self.row_values(r)));
        out
    }

    /// Rows excluding the trailing totals row.
    pub fn data_rows(&self) -> impl Iterator<Item = &TimesheetRow> {
        self.rows.iter().filter(|r| !r.is_total)
    }

    /// Inclusive `(first, last)` row indexes (into `rows`) of each date group.
    pub fn group_ranges(&self) -> Vec<(usize, usize)> {
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut current: Option<usize> = None;

        for (i, row) in self.rows.iter().enumerate() {
            let Some(group) = row.date_group_index else {
                continue;
            };
            if current == Some(group) {
                if let Some(last) = ranges.last_mut() {
                    last.1 = i;
                }
            } else {
                ranges.push((i, i));
                current = Some(group);
            }
        }

        ranges
    }
}
