//! Serializable status views for dashboards and admin back-office queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AssignmentCandidate, BatchId, CandidateId, DeveloperId, ExperienceLevel, ProjectId,
    ResponseStatus,
};

/// Per-project candidate counts by response status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub expired: usize,
}

impl CandidateCounts {
    pub fn tally<'a>(candidates: impl IntoIterator<Item = &'a AssignmentCandidate>) -> Self {
        let mut counts = Self::default();
        for c in candidates {
            match c.status {
                ResponseStatus::Pending => counts.pending += 1,
                ResponseStatus::Accepted => counts.accepted += 1,
                ResponseStatus::Rejected => counts.rejected += 1,
                ResponseStatus::Expired => counts.expired += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.accepted + self.rejected + self.expired
    }
}

/// Snapshot of one batch and its members, for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatus {
    pub batch_id: BatchId,
    pub project_id: ProjectId,
    pub acceptance_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub candidates: Vec<CandidateView>,
}

/// Serializable view of a single candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateView {
    pub candidate_id: CandidateId,
    pub developer_id: DeveloperId,
    pub level: ExperienceLevel,
    pub status: ResponseStatus,
    pub is_first_accepted: bool,
}

impl From<&AssignmentCandidate> for CandidateView {
    fn from(c: &AssignmentCandidate) -> Self {
        Self {
            candidate_id: c.candidate_id,
            developer_id: c.developer_id,
            level: c.level,
            status: c.status,
            is_first_accepted: c.is_first_accepted,
        }
    }
}
