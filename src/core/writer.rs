//! Idempotent CSV output
//!
//! Output layout is `<root>/<S>/<S> <YYYYMMDD>.csv` where `S` is the sanitized
//! sheet name. An existing destination is never touched, and new files are
//! staged in the target folder then linked into place, so a destination is
//! either absent or complete.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::normalize::NormalizedTable;
use crate::core::sanitize::sanitize_sheet_name;
use crate::core::types::PartitionDate;
use crate::error::SheetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, rows: usize },
    AlreadyExists { path: PathBuf },
}

/// Destination of one sheet for one partition date
pub fn output_path(output_root: &Path, sheet_name: &str, date: &PartitionDate) -> PathBuf {
    let name = sanitize_sheet_name(sheet_name);
    let file_name = format!("{name} {}.csv", date.compact());
    output_root.join(&name).join(file_name)
}

pub fn write_table(
    output_root: &Path,
    sheet_name: &str,
    date: &PartitionDate,
    table: &NormalizedTable,
) -> Result<WriteOutcome, SheetError> {
    let path = output_path(output_root, sheet_name, date);
    let Some(folder) = path.parent() else {
        return Err(SheetError::Other(format!("no parent folder for {}", path.display())));
    };
    fs::create_dir_all(folder).map_err(|source| SheetError::CreateDir {
        path: folder.to_path_buf(),
        source,
    })?;

    if path.exists() {
        debug!(path = %path.display(), "output already exists");
        return Ok(WriteOutcome::AlreadyExists { path });
    }

    let write_err = |source| SheetError::Write {
        path: path.clone(),
        source,
    };

    let staged = tempfile::Builder::new()
        .prefix(".sheetsplit-")
        .suffix(".partial")
        .tempfile_in(folder)
        .map_err(write_err)?;

    let mut writer = csv::Writer::from_writer(staged);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    let mut staged = writer
        .into_inner()
        .map_err(|e| write_err(std::io::Error::new(e.error().kind(), e.error().to_string())))?;
    staged.flush().map_err(write_err)?;

    match staged.persist_noclobber(&path) {
        Ok(_) => Ok(WriteOutcome::Written {
            path,
            rows: table.row_count(),
        }),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            Ok(WriteOutcome::AlreadyExists { path })
        }
        Err(e) => Err(write_err(e.error)),
    }
}
