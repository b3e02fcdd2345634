//! Store module: the AssignmentStore port and its in-memory implementation.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    AssignmentBatch, AssignmentCandidate, BatchId, CandidateId, DeveloperProfile, ProjectId,
    ProjectRecord,
};
use crate::error::RotaError;
use crate::observability::{BatchStatus, CandidateCounts};

/// Result of installing a batch as a project's current batch.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// The batch that was current before, if any.
    pub previous_batch: Option<BatchId>,

    /// Pending candidates of the previous batch that were expired by the
    /// installation. Returned as full rows so callers can emit
    /// per-candidate expiry notifications.
    pub expired: Vec<AssignmentCandidate>,
}

/// Storage port (interface).
///
/// Design intent:
/// - The store owns state transitions and runs each mutating method as one
///   critical section. That is what makes first-accept-wins race-free: two
///   concurrent `try_accept` calls serialize here, and exactly one wins.
/// - Services (rotation, expiry) orchestrate: they read, decide, and call
///   the atomic primitives below. They never mutate records themselves.
/// - v1 is in-memory, but this trait is the seam for a database-backed
///   implementation later.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Add or replace a developer profile.
    async fn register_developer(&self, profile: DeveloperProfile) -> Result<(), RotaError>;

    /// Create a new project. Overwriting an existing project is an error in
    /// the making, so the caller is expected to use fresh ids.
    async fn create_project(&self, record: ProjectRecord) -> Result<(), RotaError>;

    async fn project(&self, project_id: ProjectId) -> Result<ProjectRecord, RotaError>;

    /// All registered developers (selection input).
    async fn developers(&self) -> Result<Vec<DeveloperProfile>, RotaError>;

    /// Full candidate history for a project, across all batches.
    async fn candidates_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<AssignmentCandidate>, RotaError>;

    async fn candidate(&self, candidate_id: CandidateId)
    -> Result<AssignmentCandidate, RotaError>;

    async fn batch(&self, batch_id: BatchId) -> Result<AssignmentBatch, RotaError>;

    /// The project's current batch, if one was ever generated.
    async fn current_batch(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<AssignmentBatch>, RotaError>;

    /// Atomically install `batch` as the project's current batch: any
    /// still-pending candidates of the previous current batch are expired,
    /// the new rows are inserted, and `current_batch_id` is repointed.
    ///
    /// Fails closed if the project is unknown or already accepted.
    async fn install_batch(
        &self,
        batch: AssignmentBatch,
        candidates: Vec<AssignmentCandidate>,
        now: DateTime<Utc>,
    ) -> Result<InstallOutcome, RotaError>;

    /// Atomic first-accept-wins acceptance.
    ///
    /// In one critical section: the candidate must be pending, its deadline
    /// must not have passed, and the project must still be open. On success
    /// the candidate is accepted with `is_first_accepted = true` and the
    /// project transitions to accepted.
    ///
    /// A candidate found past its deadline is expired on the spot and the
    /// call fails with [`RotaError::DeadlineExpired`].
    async fn try_accept(
        &self,
        candidate_id: CandidateId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentCandidate, RotaError>;

    /// Pending -> Rejected. Fails closed on any non-pending candidate.
    async fn mark_rejected(
        &self,
        candidate_id: CandidateId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentCandidate, RotaError>;

    /// Expire every candidate still pending past its deadline at `now`.
    /// Idempotent: re-running only touches candidates newly past deadline.
    /// Returns the expired rows so callers can emit notifications.
    async fn expire_due(&self, now: DateTime<Utc>)
    -> Result<Vec<AssignmentCandidate>, RotaError>;

    /// Observability hook: per-project counts by response status.
    async fn counts_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<CandidateCounts, RotaError>;

    /// Observability hook: snapshot of one batch and its members.
    async fn batch_status(&self, batch_id: BatchId) -> Result<BatchStatus, RotaError>;
}
