use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Input folder does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure while reading, transforming or writing one sheet (or opening one workbook)
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("{0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input folder given (use --input or save one with a previous run)")]
    MissingInput,

    #[error("No output folder given (use --output or save one with a previous run)")]
    MissingOutput,

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("No spreadsheet files found under {}", path.display())]
    NoWorkbooks { path: PathBuf },

    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    Sheet(#[from] SheetError),
}
