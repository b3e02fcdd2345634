//! Candidate record: one developer proposed within a batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BatchId, CandidateId, DeveloperId, ProjectId};
use super::skill::ExperienceLevel;
use super::state::ResponseStatus;

/// A developer proposed for a project within a batch.
///
/// Design:
/// - All state transitions happen here, via methods that enforce the
///   one-way machine (Pending -> Accepted | Rejected | Expired).
/// - The store holds these records as the single source of truth; services
///   never mutate fields directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCandidate {
    pub candidate_id: CandidateId,
    pub batch_id: BatchId,
    pub project_id: ProjectId,
    pub developer_id: DeveloperId,

    /// Tier the developer was selected under (frozen at selection time,
    /// even if the profile later changes).
    pub level: ExperienceLevel,

    pub status: ResponseStatus,

    /// True for at most one candidate per project.
    pub is_first_accepted: bool,

    /// Hard deadline for answering; past it the candidate expires.
    pub acceptance_deadline: DateTime<Utc>,

    /// When the developer answered (accept or reject), if ever.
    pub responded_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssignmentCandidate {
    pub fn new(
        candidate_id: CandidateId,
        batch_id: BatchId,
        project_id: ProjectId,
        developer_id: DeveloperId,
        level: ExperienceLevel,
        acceptance_deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            candidate_id,
            batch_id,
            project_id,
            developer_id,
            level,
            status: ResponseStatus::Pending,
            is_first_accepted: false,
            acceptance_deadline,
            responded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Has the acceptance deadline passed at `now`?
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now >= self.acceptance_deadline
    }

    /// Pending -> Accepted. Caller (the store) is responsible for the
    /// project-level first-accept check; this only enforces the candidate
    /// machine.
    pub fn mark_accepted(&mut self, first_for_project: bool, now: DateTime<Utc>) {
        debug_assert!(self.status.is_pending());
        self.status = ResponseStatus::Accepted;
        self.is_first_accepted = first_for_project;
        self.responded_at = Some(now);
        self.updated_at = now;
    }

    /// Pending -> Rejected.
    pub fn mark_rejected(&mut self, now: DateTime<Utc>) {
        debug_assert!(self.status.is_pending());
        self.status = ResponseStatus::Rejected;
        self.responded_at = Some(now);
        self.updated_at = now;
    }

    /// Pending -> Expired. No `responded_at`: nobody answered.
    pub fn mark_expired(&mut self, now: DateTime<Utc>) {
        debug_assert!(self.status.is_pending());
        self.status = ResponseStatus::Expired;
        self.updated_at = now;
    }
}
