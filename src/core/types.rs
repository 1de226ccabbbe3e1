//! Core data types shared across the pipeline
//!
//! Partitions and source files come out of the scan phase and are read-only
//! afterwards; outcome records accumulate across a run.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

use crate::consts::{DATE_FORMAT, FILE_DATE_FORMAT, UNKNOWN};

/// Textual grammar a partition folder name was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateGrammar {
    /// `YYYY-MM-DD`
    Dashed,
    /// `YYYY.MM.DD`
    Dotted,
    /// `YYYY_MM_DD`
    Underscored,
    /// `YYYYMMDD`
    Compact,
}

impl DateGrammar {
    /// Evaluation order used by the parser
    pub const ALL: [DateGrammar; 4] = [
        DateGrammar::Dashed,
        DateGrammar::Dotted,
        DateGrammar::Underscored,
        DateGrammar::Compact,
    ];

    pub fn separator(self) -> Option<char> {
        match self {
            DateGrammar::Dashed => Some('-'),
            DateGrammar::Dotted => Some('.'),
            DateGrammar::Underscored => Some('_'),
            DateGrammar::Compact => None,
        }
    }

    pub fn format_str(self) -> &'static str {
        match self {
            DateGrammar::Dashed => "%Y-%m-%d",
            DateGrammar::Dotted => "%Y.%m.%d",
            DateGrammar::Underscored => "%Y_%m_%d",
            DateGrammar::Compact => "%Y%m%d",
        }
    }
}

/// Calendar date of one partition folder, plus the grammar it was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionDate {
    date: NaiveDate,
    grammar: DateGrammar,
}

impl PartitionDate {
    pub fn new(date: NaiveDate, grammar: DateGrammar) -> Self {
        PartitionDate { date, grammar }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn grammar(&self) -> DateGrammar {
        self.grammar
    }

    /// "2024-01-15", the value stamped into the Date column
    pub fn iso(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// "20240115", the suffix used in output file names
    pub fn compact(&self) -> String {
        self.date.format(FILE_DATE_FORMAT).to_string()
    }

    /// Render the date back in the grammar it was parsed from
    pub fn folder_name(&self) -> String {
        self.date.format(self.grammar.format_str()).to_string()
    }
}

impl fmt::Display for PartitionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(DATE_FORMAT))
    }
}

impl Serialize for PartitionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One spreadsheet found inside a partition folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub date: PartitionDate,
    /// Name of the owning partition folder
    pub partition: String,
}

/// One date-named subfolder of the input root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub name: String,
    pub path: PathBuf,
    pub date: PartitionDate,
    pub file_count: usize,
}

/// Result of scanning an input root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub partitions: Vec<Partition>,
    pub files: Vec<SourceFile>,
}

impl ScanResult {
    pub fn total_partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Skipped,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Result of one (file, sheet) conversion attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    pub status: OutcomeStatus,
    pub source_file: PathBuf,
    pub sheet_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_written: Option<usize>,
}

impl OutcomeRecord {
    pub fn success(
        source_file: PathBuf,
        sheet_name: &str,
        output_path: PathBuf,
        rows: usize,
    ) -> Self {
        OutcomeRecord {
            status: OutcomeStatus::Success,
            source_file,
            sheet_name: sheet_name.to_string(),
            output_path: Some(output_path),
            reason: None,
            rows_written: Some(rows),
        }
    }

    pub fn skipped(
        source_file: PathBuf,
        sheet_name: &str,
        reason: &str,
        output_path: Option<PathBuf>,
    ) -> Self {
        OutcomeRecord {
            status: OutcomeStatus::Skipped,
            source_file,
            sheet_name: sheet_name.to_string(),
            output_path,
            reason: Some(reason.to_string()),
            rows_written: None,
        }
    }

    pub fn error(source_file: PathBuf, sheet_name: &str, reason: String) -> Self {
        OutcomeRecord {
            status: OutcomeStatus::Error,
            source_file,
            sheet_name: sheet_name.to_string(),
            output_path: None,
            reason: Some(reason),
            rows_written: None,
        }
    }

    /// The single record emitted for a workbook that cannot be opened at all
    pub fn file_error(source_file: PathBuf, reason: String) -> Self {
        Self::error(source_file, UNKNOWN, reason)
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}
