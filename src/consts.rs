/// ISO date used for the stamped "Date" column: "2024-01-15"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date suffix used in output file names: "20240115"
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Sheet name recorded when a whole workbook cannot be opened
pub const UNKNOWN: &str = "unknown";

/// Fallback for sheet names that sanitize to nothing
pub const DEFAULT_SHEET_NAME: &str = "Sheet";

/// Name of the column stamped with the partition date
pub const DATE_COLUMN: &str = "Date";

/// Row promoted to column names (0-indexed)
pub const HEADER_ROW: usize = 4;

/// A leading column is dropped when more than this share of its cells is blank
pub const BLANK_COLUMN_RATIO: f64 = 0.8;

/// Extensions recognized as spreadsheets, matched case-insensitively
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls"];

pub const REASON_INSUFFICIENT_DATA: &str = "Sheet is empty or has insufficient data";
pub const REASON_NO_DATA_ROWS: &str = "No data rows after processing";
pub const REASON_ALREADY_EXISTS: &str = "File already exists";
