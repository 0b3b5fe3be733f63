use std::collections::BTreeMap;

use enrol_model::{RecordError, RecordId, RejectKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Accepted { id: RecordId },
    Rejected { reason: RecordError },
}

/// What happened to one input row.
///
/// `row` is the 1-based position among the data rows the parser returned.
/// The header and blank rows are not counted, so it can differ from the
/// line number in the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub row: usize,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn rejection(&self) -> Option<&RecordError> {
        match &self.status {
            RecordStatus::Rejected { reason } => Some(reason),
            RecordStatus::Accepted { .. } => None,
        }
    }
}

/// Result of one bulk upload.
///
/// `duplicates` is tallied on its own; the other rejection reasons are only
/// visible through the per-row outcomes and the derived counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub table: String,
    pub total: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, row: usize, status: RecordStatus) {
        self.total += 1;
        match &status {
            RecordStatus::Accepted { .. } => self.accepted += 1,
            RecordStatus::Rejected {
                reason: RecordError::Duplicate,
            } => self.duplicates += 1,
            RecordStatus::Rejected { .. } => {}
        }
        self.outcomes.push(RecordOutcome { row, status });
    }

    /// Rows rejected for any reason other than being a duplicate.
    pub fn rejected(&self) -> usize {
        self.total - self.accepted - self.duplicates
    }

    pub fn rejections(&self) -> impl Iterator<Item = (usize, &RecordError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.rejection().map(|reason| (outcome.row, reason)))
    }

    pub fn rejections_by_kind(&self) -> BTreeMap<RejectKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, reason) in self.rejections() {
            *counts.entry(reason.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn accepted_ids(&self) -> impl Iterator<Item = &RecordId> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.status {
            RecordStatus::Accepted { id } => Some(id),
            RecordStatus::Rejected { .. } => None,
        })
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Bulk registration complete, {} duplicates were found",
            self.duplicates
        )
    }
}
