//! Sample input trees for trying the converter out
//!
//! `write_workbook` is also what the tests use to build real xlsx fixtures.

use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::AppError;

/// Folder created under the chosen input root
pub const SAMPLE_FOLDER: &str = "sample_fpk";

pub const SAMPLE_DATES: [&str; 3] = ["2024-01-15", "2024-01-16", "2024-01-17"];

pub const SAMPLE_SHEETS: [&str; 3] = ["Sheet1", "Data", "Report"];

/// One worksheet to write; empty strings leave the cell unset
#[derive(Debug, Clone)]
pub struct SheetSpec {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetSpec {
    pub fn new<S: AsRef<str>>(name: &str, rows: &[Vec<S>]) -> Self {
        SheetSpec {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.as_ref().to_string()).collect())
                .collect(),
        }
    }
}

/// Write an xlsx workbook with the given sheets, in order
pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&spec.name)?;
        for (r, row) in spec.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                match value.parse::<f64>() {
                    Ok(n) if n.is_finite() => worksheet.write_number(r as u32, c as u16, n)?,
                    _ => worksheet.write_string(r as u32, c as u16, value)?,
                };
            }
        }
    }
    workbook.save(path)
}

/// The grid written into every sample sheet: a title row, blank spacer rows,
/// the header on row 4 and one data row.
pub fn sample_grid() -> Vec<Vec<String>> {
    let grid: [[&str; 4]; 6] = [
        ["Unnamed: 0", "Col1", "Col2", "Col3"],
        ["", "", "", ""],
        ["", "", "", ""],
        ["", "", "", ""],
        ["", "Header1", "Header2", "Header3"],
        ["Row0", "Data1", "Data2", "Data3"],
    ];
    grid.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Create `<root>/sample_fpk/<date>/sample_data_<date>.xlsx` for each sample date.
///
/// Returns the sample root, which can be used directly as an input folder.
pub fn create_sample_tree(root: &Path) -> Result<PathBuf, AppError> {
    let sample_root = root.join(SAMPLE_FOLDER);
    let grid = sample_grid();
    let sheets: Vec<SheetSpec> = SAMPLE_SHEETS
        .iter()
        .map(|name| SheetSpec::new(name, &grid))
        .collect();

    for date in SAMPLE_DATES {
        let dir = sample_root.join(date);
        fs::create_dir_all(&dir).map_err(|source| AppError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let file = dir.join(format!("sample_data_{date}.xlsx"));
        write_workbook(&file, &sheets)?;
        info!(file = %file.display(), "wrote sample workbook");
    }
    Ok(sample_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalamineWorkbook, WorkbookReader, cell_text, scan};
    use tempfile::TempDir;

    #[test]
    fn sample_tree_scans_as_three_partitions() {
        let tmp = TempDir::new().unwrap();
        let root = create_sample_tree(tmp.path()).unwrap();
        let result = scan(&root).unwrap();
        assert_eq!(result.total_partitions(), 3);
        assert_eq!(result.total_files(), 3);
    }

    #[test]
    fn written_workbook_reads_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("book.xlsx");
        let rows = vec![vec!["", "b"], vec!["42", "text"]];
        write_workbook(&path, &[SheetSpec::new("One", &rows), SheetSpec::new("Two", &rows)])
            .unwrap();

        let mut wb = CalamineWorkbook::open(&path).unwrap();
        assert_eq!(wb.sheet_names(), ["One", "Two"]);
        let sheet = wb.read_sheet("One").unwrap();
        assert_eq!(sheet.height(), 2);
        assert_eq!(cell_text(sheet.cell(0, 1)), "b");
        assert_eq!(cell_text(sheet.cell(1, 0)), "42");
    }
}
