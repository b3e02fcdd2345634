use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BatchId, CandidateId, ProjectId};

/// A generated group of candidates for a project at a point in time.
///
/// The batch itself carries no state machine; currency is decided by
/// `ProjectRecord.current_batch_id`, and lifecycle lives on the candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentBatch {
    pub batch_id: BatchId,
    pub project_id: ProjectId,

    /// Members, in selection order (tier by tier).
    pub candidate_ids: Vec<CandidateId>,

    /// Deadline shared by every candidate in this batch.
    pub acceptance_deadline: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl AssignmentBatch {
    pub fn new(
        batch_id: BatchId,
        project_id: ProjectId,
        candidate_ids: Vec<CandidateId>,
        acceptance_deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            batch_id,
            project_id,
            candidate_ids,
            acceptance_deadline,
            created_at: now,
        }
    }

    pub fn len(&self) -> usize {
        self.candidate_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_ids.is_empty()
    }
}
