//! Per-file, per-sheet conversion loop
//!
//! Each sheet attempt produces exactly one [`OutcomeRecord`]; a workbook that
//! cannot be opened produces one record with sheet name "unknown". Nothing
//! raised while handling one unit reaches its siblings.

use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::consts::REASON_ALREADY_EXISTS;
use crate::core::normalize::{Normalized, normalize};
use crate::core::report::ProcessingReport;
use crate::core::types::{OutcomeRecord, OutcomeStatus, PartitionDate, SourceFile};
use crate::core::workbook::{CalamineWorkbook, WorkbookReader};
use crate::core::writer::{WriteOutcome, write_table};
use crate::error::SheetError;

/// One completed (file, sheet) unit, handed to the progress callback
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 0-based index of the file being processed
    pub file_index: usize,
    pub file_count: usize,
    pub file: &'a SourceFile,
    pub record: &'a OutcomeRecord,
}

/// Convert every sheet of the workbook at `path`.
pub fn convert(path: &Path, date: &PartitionDate, output_root: &Path) -> Vec<OutcomeRecord> {
    let mut records = Vec::new();
    let _ = convert_with(path, date, output_root, &mut |record| {
        records.push(record);
        ControlFlow::Continue(())
    });
    records
}

/// Convert every sheet of an already opened workbook.
pub fn convert_workbook<W: WorkbookReader>(
    workbook: &mut W,
    path: &Path,
    date: &PartitionDate,
    output_root: &Path,
) -> Vec<OutcomeRecord> {
    let mut records = Vec::new();
    let _ = convert_sheets(workbook, path, date, output_root, &mut |record| {
        records.push(record);
        ControlFlow::Continue(())
    });
    records
}

/// Run the whole batch in scan order, one file at a time.
///
/// `on_record` sees each record as soon as its unit completes; returning
/// `ControlFlow::Break` stops before the next sheet. Outputs already written
/// stay in place.
pub fn run<F>(files: &[SourceFile], output_root: &Path, mut on_record: F) -> ProcessingReport
where
    F: FnMut(Progress<'_>) -> ControlFlow<()>,
{
    let mut report = ProcessingReport::new();
    let file_count = files.len();
    info!(files = file_count, output = %output_root.display(), "conversion started");

    for (file_index, file) in files.iter().enumerate() {
        info!(
            "Processing {}/{}: {}",
            file_index + 1,
            file_count,
            file.path.display()
        );
        let flow = convert_with(&file.path, &file.date, output_root, &mut |record| {
            report.push(record);
            let record = &report.records()[report.len() - 1];
            on_record(Progress {
                file_index,
                file_count,
                file,
                record,
            })
        });
        if flow.is_break() {
            info!("conversion stopped by caller");
            break;
        }
    }

    let counts = report.counts();
    info!(
        success = counts.success,
        skipped = counts.skipped,
        error = counts.error,
        "conversion finished"
    );
    report
}

fn convert_with(
    path: &Path,
    date: &PartitionDate,
    output_root: &Path,
    sink: &mut dyn FnMut(OutcomeRecord) -> ControlFlow<()>,
) -> ControlFlow<()> {
    match CalamineWorkbook::open(path) {
        Ok(mut workbook) => convert_sheets(&mut workbook, path, date, output_root, sink),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot open workbook");
            sink(OutcomeRecord::file_error(path.to_path_buf(), e.to_string()))
        }
    }
}

fn convert_sheets<W: WorkbookReader + ?Sized>(
    workbook: &mut W,
    path: &Path,
    date: &PartitionDate,
    output_root: &Path,
    sink: &mut dyn FnMut(OutcomeRecord) -> ControlFlow<()>,
) -> ControlFlow<()> {
    for sheet_name in workbook.sheet_names() {
        let record = match convert_sheet(workbook, path, &sheet_name, date, output_root) {
            Ok(record) => record,
            Err(e) => OutcomeRecord::error(
                path.to_path_buf(),
                &sheet_name,
                format!("Sheet processing error: {e}"),
            ),
        };
        match record.status {
            OutcomeStatus::Error => warn!(
                sheet = %sheet_name,
                file = %path.display(),
                reason = record.reason.as_deref().unwrap_or_default(),
                "sheet failed"
            ),
            _ => debug!(sheet = %sheet_name, status = %record.status, "sheet done"),
        }
        sink(record)?;
    }
    ControlFlow::Continue(())
}

fn convert_sheet<W: WorkbookReader + ?Sized>(
    workbook: &mut W,
    path: &Path,
    sheet_name: &str,
    date: &PartitionDate,
    output_root: &Path,
) -> Result<OutcomeRecord, SheetError> {
    let raw = workbook.read_sheet(sheet_name)?;
    let table = match normalize(&raw, date) {
        Normalized::Table(table) => table,
        Normalized::Skipped(reason) => {
            return Ok(OutcomeRecord::skipped(path.to_path_buf(), sheet_name, reason, None));
        }
    };

    let record = match write_table(output_root, sheet_name, date, &table)? {
        WriteOutcome::Written { path: out, rows } => {
            OutcomeRecord::success(path.to_path_buf(), sheet_name, out, rows)
        }
        WriteOutcome::AlreadyExists { path: out } => OutcomeRecord::skipped(
            path.to_path_buf(),
            sheet_name,
            REASON_ALREADY_EXISTS,
            Some(out),
        ),
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{REASON_INSUFFICIENT_DATA, REASON_NO_DATA_ROWS};
    use crate::core::date::parse_partition_date;
    use crate::core::workbook::RawSheet;
    use crate::sample::{SheetSpec, sample_grid, write_workbook};
    use std::fs;
    use tempfile::TempDir;

    /// Workbook double whose sheets either load or fail
    struct FakeWorkbook {
        sheets: Vec<(String, Result<RawSheet, String>)>,
    }

    impl WorkbookReader for FakeWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.sheets.iter().map(|(n, _)| n.clone()).collect()
        }

        fn read_sheet(&mut self, name: &str) -> Result<RawSheet, SheetError> {
            let (_, sheet) = self
                .sheets
                .iter()
                .find(|(n, _)| n == name)
                .ok_or_else(|| SheetError::Other(format!("no sheet {name}")))?;
            sheet.clone().map_err(SheetError::Other)
        }
    }

    fn data_sheet() -> RawSheet {
        RawSheet::from_strings([
            vec!["", "title"],
            vec!["", ""],
            vec!["", ""],
            vec!["", ""],
            vec!["", "Metric", "Value"],
            vec!["", "visits", "12"],
            vec!["", "", ""],
        ])
    }

    #[test]
    fn failing_sheet_is_isolated() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let mut wb = FakeWorkbook {
            sheets: vec![
                ("First".into(), Ok(data_sheet())),
                ("Broken".into(), Err("corrupt xml".into())),
                ("Tiny".into(), Ok(RawSheet::from_strings([vec!["x"]]))),
                ("Last".into(), Ok(data_sheet())),
            ],
        };
        let records = convert_workbook(&mut wb, Path::new("in/a.xlsx"), &date, tmp.path());
        assert_eq!(records.len(), 4);
        let statuses: Vec<_> = records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                OutcomeStatus::Success,
                OutcomeStatus::Error,
                OutcomeStatus::Skipped,
                OutcomeStatus::Success
            ]
        );
        assert_eq!(records[1].sheet_name, "Broken");
        assert_eq!(
            records[1].reason.as_deref(),
            Some("Sheet processing error: corrupt xml")
        );
        assert_eq!(records[2].reason.as_deref(), Some(REASON_INSUFFICIENT_DATA));
        assert!(tmp.path().join("Last").join("Last 20240115.csv").exists());
    }

    #[test]
    fn short_sheet_yields_single_skip() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let mut wb = FakeWorkbook {
            sheets: vec![("Only".into(), Ok(RawSheet::from_strings([vec!["a", "b"]])))],
        };
        let records = convert_workbook(&mut wb, Path::new("a.xlsx"), &date, tmp.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, OutcomeStatus::Skipped);
        assert!(!tmp.path().join("Only").exists());
    }

    #[test]
    fn header_only_sheet_is_skipped_without_output() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let mut wb = FakeWorkbook {
            sheets: vec![("Head".into(), Ok(RawSheet::from_strings([vec!["a"], vec!["b"]])))],
        };
        let records = convert_workbook(&mut wb, Path::new("a.xlsx"), &date, tmp.path());
        assert_eq!(records[0].reason.as_deref(), Some(REASON_NO_DATA_ROWS));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn unreadable_workbook_yields_one_unknown_error() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("broken.xlsx");
        fs::write(&bad, b"this is not a zip archive").unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let records = convert(&bad, &date, &tmp.path().join("out"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, OutcomeStatus::Error);
        assert_eq!(records[0].sheet_name, "unknown");
        assert_eq!(records[0].source_file, bad);
    }

    #[test]
    fn run_reports_progress_and_can_stop() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let files: Vec<SourceFile> = ["a.xlsx", "b.xlsx", "c.xlsx"]
            .iter()
            .map(|name| {
                let path = tmp.path().join(name);
                fs::write(&path, b"garbage").unwrap();
                SourceFile {
                    path,
                    date,
                    partition: "2024-01-15".into(),
                }
            })
            .collect();

        let mut seen = Vec::new();
        let report = run(&files, &tmp.path().join("out"), |p| {
            seen.push((p.file_index, p.file_count, p.record.status));
            if p.file_index == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(report.len(), 2);
        assert_eq!(seen, [(0, 3, OutcomeStatus::Error), (1, 3, OutcomeStatus::Error)]);
    }

    #[test]
    fn break_inside_workbook_skips_remaining_sheets() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let mut wb = FakeWorkbook {
            sheets: vec![
                ("One".into(), Ok(data_sheet())),
                ("Two".into(), Ok(data_sheet())),
                ("Three".into(), Ok(data_sheet())),
            ],
        };
        let mut report = ProcessingReport::new();
        let flow = convert_sheets(&mut wb, Path::new("a.xlsx"), &date, tmp.path(), &mut |r| {
            report.push(r);
            ControlFlow::Break(())
        });
        assert!(flow.is_break());
        assert_eq!(report.len(), 1);
        assert_eq!(report.records()[0].sheet_name, "One");
        assert!(!tmp.path().join("Two").exists());
        assert!(!tmp.path().join("Three").exists());
    }

    #[test]
    fn run_stops_between_sheets_of_one_file() {
        let tmp = TempDir::new().unwrap();
        let date = parse_partition_date("2024-01-15").unwrap();
        let path = tmp.path().join("multi.xlsx");
        let grid = sample_grid();
        let sheets: Vec<SheetSpec> = ["One", "Two", "Three"]
            .iter()
            .map(|name| SheetSpec::new(name, &grid))
            .collect();
        write_workbook(&path, &sheets).unwrap();
        let files = [SourceFile {
            path,
            date,
            partition: "2024-01-15".into(),
        }];

        let out = tmp.path().join("out");
        let report = run(&files, &out, |_| ControlFlow::Break(()));
        assert_eq!(report.len(), 1);
        assert_eq!(report.records()[0].status, OutcomeStatus::Success);
        assert!(out.join("One").join("One 20240115.csv").exists());
        assert!(!out.join("Two").exists());
    }
}
