//! CLI subcommand definitions

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the date partitions and spreadsheets found under the input folder
    Scan(FolderArgs),
    /// Convert every sheet of every spreadsheet into per-sheet CSV files
    Convert(FolderArgs),
    /// List the sheets of the first spreadsheet and the folder each maps to
    Preview(FolderArgs),
    /// Create a sample input tree under the input folder
    Sample(FolderArgs),
}

/// Input/output folders; missing values fall back to the saved paths, then the config
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FolderArgs {
    /// Folder containing date-named subfolders (YYYY-MM-DD, YYYY.MM.DD, YYYY_MM_DD, YYYYMMDD)
    #[arg(short, long, value_name = "DIR")]
    pub(crate) input: Option<PathBuf>,

    /// Folder receiving one subfolder of CSV files per sheet
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<PathBuf>,
}

impl Commands {
    pub(crate) fn folders(&self) -> &FolderArgs {
        match self {
            Commands::Scan(args)
            | Commands::Convert(args)
            | Commands::Preview(args)
            | Commands::Sample(args) => args,
        }
    }
}
