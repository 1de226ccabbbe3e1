//! Structural normalization of one worksheet
//!
//! The heuristic is fixed: drop a mostly blank leading column, promote row 4
//! to the header, discard fully blank rows and stamp the partition date.

use tracing::debug;

use crate::consts::{
    BLANK_COLUMN_RATIO, DATE_COLUMN, HEADER_ROW, REASON_INSUFFICIENT_DATA, REASON_NO_DATA_ROWS,
};
use crate::core::types::PartitionDate;
use crate::core::workbook::{RawSheet, cell_text, is_blank};

/// Tabular result after header promotion, blank-row removal and date stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of normalizing one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Table(NormalizedTable),
    /// Nothing to write; carries the skip reason
    Skipped(&'static str),
}

/// Header row actually used for a sheet of `height` rows
pub fn header_row_index(height: usize) -> usize {
    if HEADER_ROW < height {
        HEADER_ROW
    } else {
        height.saturating_sub(1)
    }
}

/// True when more than [`BLANK_COLUMN_RATIO`] of the first column is blank
fn first_column_mostly_blank(sheet: &RawSheet) -> bool {
    let height = sheet.height();
    if height == 0 || sheet.width() == 0 {
        return false;
    }
    let blank = (0..height).filter(|&r| is_blank(sheet.cell(r, 0))).count();
    blank as f64 / height as f64 > BLANK_COLUMN_RATIO
}

pub fn normalize(sheet: &RawSheet, date: &PartitionDate) -> Normalized {
    let height = sheet.height();
    if height < 2 {
        return Normalized::Skipped(REASON_INSUFFICIENT_DATA);
    }

    let first_col = usize::from(first_column_mostly_blank(sheet));
    let width = sheet.width();
    let header_row = header_row_index(height);
    debug!(
        height,
        width,
        header_row,
        dropped_first_column = first_col == 1,
        "normalizing sheet"
    );

    let mut columns: Vec<String> = (first_col..width)
        .map(|c| cell_text(sheet.cell(header_row, c)))
        .collect();

    let mut rows: Vec<Vec<String>> = ((header_row + 1)..height)
        .filter(|&r| (first_col..width).any(|c| !is_blank(sheet.cell(r, c))))
        .map(|r| {
            (first_col..width)
                .map(|c| cell_text(sheet.cell(r, c)))
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Normalized::Skipped(REASON_NO_DATA_ROWS);
    }

    if !columns.iter().any(|c| c == DATE_COLUMN) {
        let stamp = date.iso();
        columns.insert(0, DATE_COLUMN.to_string());
        for row in &mut rows {
            row.insert(0, stamp.clone());
        }
    }

    Normalized::Table(NormalizedTable { columns, rows })
}
