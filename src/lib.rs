//! Batch conversion of date-partitioned spreadsheet exports into per-sheet CSV files.
//!
//! The pipeline is `scan` → `convert` (per file, per sheet) → `ProcessingReport`.
//! Every attempted (file, sheet) pair yields exactly one [`OutcomeRecord`].

pub mod consts;
pub mod core;
pub mod error;
pub mod sample;

pub use crate::core::{
    DateGrammar, NormalizedTable, OutcomeRecord, OutcomeStatus, Partition, PartitionDate,
    ProcessingReport, Progress, RawSheet, ScanResult, SourceFile, WorkbookReader, convert,
    count_output_files, output_path, parse_partition_date, run, sanitize_sheet_name, scan,
};
pub use crate::error::{AppError, ScanError, SheetError};
