use std::path::PathBuf;

/// How far a run got. Fatal failures are reported as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    /// The report was written, but at least one group was skipped.
    Partial,
}

/// Routing result for one group sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub rows: usize,
    /// Reason the group was skipped, if it was.
    pub skipped: Option<String>,
}

impl GroupSummary {
    pub fn routed(name: impl Into<String>, rows: usize) -> Self {
        Self {
            name: name.into(),
            rows,
            skipped: None,
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: 0,
            skipped: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub output_path: PathBuf,
    pub input_rows: usize,
    pub rows_written: usize,
    pub groups: Vec<GroupSummary>,
    pub highlighted_rows: usize,
    pub warnings: Vec<String>,
}

impl RunOutcome {
    /// Derive the status from the group results and warnings collected so far.
    pub fn finish(mut self) -> Self {
        self.status = if self.groups.iter().any(|group| group.skipped.is_some()) {
            RunStatus::Partial
        } else {
            RunStatus::Complete
        };
        self
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }
}
