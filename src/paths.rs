//! Last-used input/output folders, kept in a flat `key=value` file
//!
//! A missing or unreadable file is an empty mapping.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub(crate) const DEFAULT_PATHS_FILE: &str = "file_paths.config";
pub(crate) const INPUT_KEY: &str = "input_folder";
pub(crate) const OUTPUT_KEY: &str = "output_folder";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct SavedPaths {
    entries: BTreeMap<String, String>,
}

impl SavedPaths {
    /// Lines without `=` are ignored; the first `=` splits key from value
    pub(crate) fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| line.trim().split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SavedPaths { entries }
    }

    pub(crate) fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                debug!(file = %path.display(), error = %e, "no saved paths");
                Self::default()
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn folder(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    pub(crate) fn input(&self) -> Option<PathBuf> {
        self.folder(INPUT_KEY)
    }

    pub(crate) fn output(&self) -> Option<PathBuf> {
        self.folder(OUTPUT_KEY)
    }

    pub(crate) fn save(path: &Path, input: &Path, output: &Path) -> io::Result<()> {
        let content = format!(
            "{INPUT_KEY}={}\n{OUTPUT_KEY}={}\n",
            input.display(),
            output.display()
        );
        fs::write(path, content)
    }
}
