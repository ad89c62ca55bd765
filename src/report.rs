//! Results of an organize run.

use crate::file_organizer::{OrganizeError, Outcome};
use serde::Serialize;
use std::path::PathBuf;

/// A recoverable problem met during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunWarning {
    /// The file or directory involved, when known.
    pub path: Option<PathBuf>,
    pub message: String,
}

impl From<&OrganizeError> for RunWarning {
    fn from(error: &OrganizeError) -> Self {
        Self {
            path: error.path().map(PathBuf::from),
            message: error.to_string(),
        }
    }
}

/// Counters and warnings collected over one run.
///
/// `moved` includes previewed moves in dry-run mode, so a dry run reports
/// the same number a real run would. Excluded files appear in neither
/// `moved` nor `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub moved: usize,
    pub skipped: usize,
    pub excluded: usize,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    /// Counts one processed file.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Previewed { .. } | Outcome::Moved { .. } => self.moved += 1,
        }
    }

    pub fn record_warning(&mut self, error: &OrganizeError) {
        self.warnings.push(RunWarning::from(error));
    }

    /// Files moved plus files skipped.
    pub fn total_processed(&self) -> usize {
        self.moved + self.skipped
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Pretty-printed JSON, with `total_processed` included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.insert("total_processed".into(), self.total_processed().into());
        }
        serde_json::to_string_pretty(&value)
    }
}
