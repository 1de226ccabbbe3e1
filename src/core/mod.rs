//! Core pipeline: scan → normalize → sanitize → write → report

mod convert;
mod date;
mod normalize;
mod report;
mod sanitize;
mod scan;
mod types;
mod workbook;
mod writer;

pub use convert::{Progress, convert, convert_workbook, run};
pub use date::parse_partition_date;
pub use normalize::{Normalized, NormalizedTable, header_row_index, normalize};
pub use report::{OutcomeGroup, ProcessingReport, StatusCounts};
pub use sanitize::sanitize_sheet_name;
pub use scan::{count_output_files, scan};
pub use types::{
    DateGrammar, OutcomeRecord, OutcomeStatus, Partition, PartitionDate, ScanResult, SourceFile,
};
pub use workbook::{CalamineWorkbook, RawSheet, WorkbookReader, cell_text, is_blank};
pub use writer::{WriteOutcome, output_path, write_table};
