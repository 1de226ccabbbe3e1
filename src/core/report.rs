//! Outcome aggregation for one run
//!
//! Records are kept in arrival order and never deduplicated; every view here
//! is derived from that sequence.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::core::types::{OutcomeRecord, OutcomeStatus};

/// Success / skipped / error counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub success: usize,
    pub skipped: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Success => self.success += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
            OutcomeStatus::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.error
    }
}

/// Records sharing one key (sheet name or source file), in arrival order
#[derive(Debug, Clone)]
pub struct OutcomeGroup<'a, K> {
    pub key: K,
    pub counts: StatusCounts,
    pub records: Vec<&'a OutcomeRecord>,
}

#[derive(Debug, Default, Clone)]
pub struct ProcessingReport {
    records: Vec<OutcomeRecord>,
}

impl ProcessingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: OutcomeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for record in &self.records {
            counts.add(record.status);
        }
        counts
    }

    pub fn with_status(&self, status: OutcomeStatus) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }

    pub fn by_sheet(&self) -> Vec<OutcomeGroup<'_, &str>> {
        group_by(&self.records, |r| r.sheet_name.as_str())
    }

    pub fn by_source_file(&self) -> Vec<OutcomeGroup<'_, &std::path::Path>> {
        group_by(&self.records, |r| r.source_file.as_path())
    }

    /// Distinct folders that received at least one new CSV
    pub fn created_folders(&self) -> BTreeSet<PathBuf> {
        self.with_status(OutcomeStatus::Success)
            .filter_map(|r| r.output_path.as_deref())
            .filter_map(|p| p.parent())
            .map(|p| p.to_path_buf())
            .collect()
    }

    /// Total rows written across successful records
    pub fn rows_written(&self) -> usize {
        self.records.iter().filter_map(|r| r.rows_written).sum()
    }
}

fn group_by<'a, K, F>(records: &'a [OutcomeRecord], key_of: F) -> Vec<OutcomeGroup<'a, K>>
where
    K: std::hash::Hash + Eq + Copy,
    F: Fn(&'a OutcomeRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<OutcomeGroup<'a, K>> = Vec::new();

    for record in records {
        let key = key_of(record);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(OutcomeGroup {
                key,
                counts: StatusCounts::default(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.counts.add(record.status);
        group.records.push(record);
    }

    groups
}
