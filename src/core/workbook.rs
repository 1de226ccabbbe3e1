//! Workbook access and raw sheet grids
//!
//! [`WorkbookReader`] is the seam between the pipeline and the spreadsheet
//! parser; the calamine-backed implementation handles both xlsx and xls.

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::SheetError;

/// A worksheet as read, anchored at cell A1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<Data>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<Data>>) -> Self {
        RawSheet { rows }
    }

    /// Build from a calamine range, re-inserting the empty rows and columns
    /// calamine trims in front of the first used cell.
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((first_row, first_col)) = range.start() else {
            return RawSheet::default();
        };
        let mut rows = vec![Vec::new(); first_row as usize];
        for row in range.rows() {
            let mut cells = vec![Data::Empty; first_col as usize];
            cells.extend(row.iter().cloned());
            rows.push(cells);
        }
        RawSheet { rows }
    }

    /// Convenience constructor from text; empty strings become empty cells
    pub fn from_strings<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|s| match s.as_ref() {
                        "" => Data::Empty,
                        text => Data::String(text.to_string()),
                    })
                    .collect()
            })
            .collect();
        RawSheet { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; shorter rows read as blank past their end
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Data {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Data::Empty)
    }
}

/// True for missing cells and empty text; whitespace counts as content
pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render a cell as CSV text
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return dt.as_f64().to_string();
            }
            match dt.as_datetime() {
                Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => dt.as_f64().to_string(),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Source of worksheets for the conversion pipeline
pub trait WorkbookReader {
    /// Sheet names in declared order
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet into a raw grid
    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, SheetError>;
}

/// Workbook opened with calamine (format chosen by file extension)
pub struct CalamineWorkbook {
    inner: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let inner = open_workbook_auto(path)?;
        Ok(CalamineWorkbook { inner })
    }
}

impl WorkbookReader for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, SheetError> {
        let range = self.inner.worksheet_range(name)?;
        Ok(RawSheet::from_range(&range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn blank_cells() {
        assert!(is_blank(&Data::Empty));
        assert!(is_blank(&Data::String(String::new())));
        assert!(!is_blank(&Data::String("   ".to_string())));
        assert!(!is_blank(&Data::String("x".to_string())));
        assert!(!is_blank(&Data::Float(0.0)));
        assert!(!is_blank(&Data::Bool(false)));
    }

    #[test]
    fn renders_scalars_as_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(-7)), "-7");
        assert_eq!(cell_text(&Data::Bool(true)), "True");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("a,b".to_string())), "a,b");
        assert_eq!(cell_text(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
    }

    #[test]
    fn from_range_restores_leading_offset() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("h1".to_string()));
        range.set_value((3, 2), Data::Int(5));
        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.height(), 4);
        assert_eq!(sheet.width(), 3);
        assert!(is_blank(sheet.cell(0, 0)));
        assert!(is_blank(sheet.cell(2, 0)));
        assert_eq!(cell_text(sheet.cell(2, 1)), "h1");
        assert_eq!(cell_text(sheet.cell(3, 2)), "5");
    }

    #[test]
    fn empty_range_is_empty_sheet() {
        let range: Range<Data> = Range::empty();
        assert_eq!(RawSheet::from_range(&range).height(), 0);
    }

    #[test]
    fn cell_out_of_bounds_is_blank() {
        let sheet = RawSheet::from_strings([vec!["a"], vec!["b", "c"]]);
        assert_eq!(sheet.width(), 2);
        assert!(is_blank(sheet.cell(0, 1)));
        assert!(is_blank(sheet.cell(9, 9)));
    }
}
