//! Folder discovery: one level of date-named partitions, spreadsheets inside each

use glob::{MatchOptions, Pattern, glob_with};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::consts::SPREADSHEET_EXTENSIONS;
use crate::core::date::parse_partition_date;
use crate::core::types::{Partition, ScanResult, SourceFile};
use crate::error::ScanError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Scan `root` for date partitions and the spreadsheets they contain.
///
/// A missing root is [`ScanError::NotFound`]. An existing root without any
/// date-named subfolder is an empty, successful result.
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let io_err = |source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %path.display(), "skipping folder with non UTF-8 name");
            continue;
        };
        match parse_partition_date(&name) {
            Some(date) => found.push((name, path, date)),
            None => debug!(folder = %name, "not a date partition"),
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));

    let mut result = ScanResult::default();
    for (name, path, date) in found {
        let spreadsheets = find_spreadsheets(&path);
        result.partitions.push(Partition {
            name: name.clone(),
            path,
            date,
            file_count: spreadsheets.len(),
        });
        result
            .files
            .extend(spreadsheets.into_iter().map(|path| SourceFile {
                path,
                date,
                partition: name.clone(),
            }));
    }

    info!(
        partitions = result.total_partitions(),
        files = result.total_files(),
        root = %root.display(),
        "scan complete"
    );
    Ok(result)
}

/// Spreadsheets directly inside `dir`, sorted by path
pub(crate) fn find_spreadsheets(dir: &Path) -> Vec<PathBuf> {
    let base = PathBuf::from(Pattern::escape(&dir.to_string_lossy()));
    let mut files = Vec::new();
    for ext in SPREADSHEET_EXTENSIONS {
        let pattern = base.join(format!("*.{ext}"));
        let paths = match glob_with(&pattern.to_string_lossy(), MATCH_OPTIONS) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern = %pattern.display(), error = %e, "invalid glob pattern");
                continue;
            }
        };
        files.extend(paths.flatten().filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    files
}

/// Count CSV files already present anywhere under `output_root`
pub fn count_output_files(output_root: &Path) -> usize {
    if !output_root.is_dir() {
        return 0;
    }
    let base = PathBuf::from(Pattern::escape(&output_root.to_string_lossy()));
    let pattern = base.join("**").join("*.csv");
    match glob_with(&pattern.to_string_lossy(), MATCH_OPTIONS) {
        Ok(paths) => paths.flatten().filter(|p| p.is_file()).count(),
        Err(_) => 0,
    }
}
