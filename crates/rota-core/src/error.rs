use thiserror::Error;

use crate::domain::{BatchId, CandidateId, ProjectId, ResponseStatus};

/// Engine error type.
///
/// Every operation fails closed: no retry, no compensation. Callers decide
/// what a given variant maps to at their boundary (the original system
/// mapped these to 404/409/400 responses).
#[derive(Debug, Error)]
pub enum RotaError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),

    #[error("candidate not found: {0}")]
    CandidateNotFound(CandidateId),

    /// First-accept-wins: the project has already been taken.
    #[error("project {0} is already accepted")]
    ProjectAlreadyAccepted(ProjectId),

    /// One-way state machine: the candidate already left `pending`.
    #[error("candidate {id} already resolved as {status}")]
    CandidateAlreadyResolved {
        id: CandidateId,
        status: ResponseStatus,
    },

    /// The acceptance deadline passed before the developer responded.
    #[error("acceptance deadline passed for candidate {0}")]
    DeadlineExpired(CandidateId),

    /// `generate_batch` on a project that already has a current batch.
    #[error("project {0} already has a current batch (use refresh_batch)")]
    BatchAlreadyCurrent(ProjectId),

    /// Selection produced no candidates (no skill overlap, or everyone
    /// already seen/unavailable).
    #[error("no eligible developers for project {0}")]
    NoEligibleDevelopers(ProjectId),

    #[error("project must declare at least one required skill: {0}")]
    NoRequiredSkills(ProjectId),
}
