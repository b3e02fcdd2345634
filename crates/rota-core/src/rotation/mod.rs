//! Rotation module: batch generation, refresh, and the accept/reject flow.

mod policy;
pub mod selection;

pub use policy::RotationPolicy;
pub use selection::SelectedDeveloper;

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    AssignmentBatch, AssignmentCandidate, CandidateId, DomainEvent, ProjectId, ProjectRecord,
    Skill,
};
use crate::error::RotaError;
use crate::ports::{Clock, EventSink, IdGenerator};
use crate::store::AssignmentStore;

/// Orchestrates the rotation lifecycle.
///
/// Design intent:
/// - The store owns atomic transitions; this service reads snapshots,
///   runs selection, and calls the store's primitives.
/// - Events are emitted after the state change committed, never before.
pub struct RotationService {
    store: Arc<dyn AssignmentStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventSink>,
    policy: RotationPolicy,
}

impl RotationService {
    pub fn new(
        store: Arc<dyn AssignmentStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        events: Arc<dyn EventSink>,
        policy: RotationPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            ids,
            events,
            policy,
        }
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Post a new project. Convenience wrapper so callers don't have to
    /// thread the clock and id generator themselves.
    pub async fn post_project(
        &self,
        title: impl Into<String>,
        required_skills: Vec<Skill>,
    ) -> Result<ProjectRecord, RotaError> {
        let now = self.clock.now();
        let record = ProjectRecord::new(self.ids.generate_project_id(), title, required_skills, now);
        if record.required_skills.is_empty() {
            return Err(RotaError::NoRequiredSkills(record.project_id));
        }
        self.store.create_project(record.clone()).await?;
        info!(project_id = %record.project_id, "project posted");
        Ok(record)
    }

    /// Generate the first batch for a project.
    ///
    /// Fails closed if a batch is already current; rotation after the first
    /// round goes through [`refresh_batch`](Self::refresh_batch).
    pub async fn generate_batch(
        &self,
        project_id: ProjectId,
    ) -> Result<AssignmentBatch, RotaError> {
        let project = self.store.project(project_id).await?;
        if !project.status.is_open() {
            return Err(RotaError::ProjectAlreadyAccepted(project_id));
        }
        if project.current_batch_id.is_some() {
            return Err(RotaError::BatchAlreadyCurrent(project_id));
        }

        let (batch, installed) = self.build_and_install(&project).await?;
        debug_assert!(installed.expired.is_empty());

        self.events
            .emit(DomainEvent::BatchGenerated {
                project_id,
                batch_id: batch.batch_id,
                candidates: batch.len(),
            })
            .await;
        info!(%project_id, batch_id = %batch.batch_id, candidates = batch.len(), "batch generated");
        Ok(batch)
    }

    /// Supersede the current batch with a fresh one.
    ///
    /// Still-pending candidates of the old batch are expired as part of the
    /// installation, so at no point do two batches have live invitations.
    ///
    /// Selection runs before anything is touched: if no fresh batch can be
    /// built (e.g. [`RotaError::NoEligibleDevelopers`]), the refresh is a
    /// no-op and the old batch stays current with its pendings intact.
    pub async fn refresh_batch(
        &self,
        project_id: ProjectId,
    ) -> Result<AssignmentBatch, RotaError> {
        let project = self.store.project(project_id).await?;
        if !project.status.is_open() {
            return Err(RotaError::ProjectAlreadyAccepted(project_id));
        }

        let (batch, installed) = self.build_and_install(&project).await?;

        match installed.previous_batch {
            Some(old_batch_id) => {
                for expired in &installed.expired {
                    self.events
                        .emit(DomainEvent::CandidateExpired {
                            project_id: expired.project_id,
                            candidate_id: expired.candidate_id,
                            developer_id: expired.developer_id,
                        })
                        .await;
                }
                self.events
                    .emit(DomainEvent::BatchRefreshed {
                        project_id,
                        old_batch_id,
                        new_batch_id: batch.batch_id,
                        expired_pending: installed.expired.len(),
                    })
                    .await;
                info!(
                    %project_id,
                    old_batch_id = %old_batch_id,
                    new_batch_id = %batch.batch_id,
                    expired_pending = installed.expired.len(),
                    "batch refreshed"
                );
            }
            // refresh on a project that never had a batch degenerates to
            // a plain generate
            None => {
                self.events
                    .emit(DomainEvent::BatchGenerated {
                        project_id,
                        batch_id: batch.batch_id,
                        candidates: batch.len(),
                    })
                    .await;
            }
        }
        Ok(batch)
    }

    /// First-accept-wins acceptance.
    pub async fn accept_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<AssignmentCandidate, RotaError> {
        let now = self.clock.now();
        match self.store.try_accept(candidate_id, now).await {
            Ok(candidate) => {
                self.events
                    .emit(DomainEvent::CandidateAccepted {
                        project_id: candidate.project_id,
                        candidate_id: candidate.candidate_id,
                        developer_id: candidate.developer_id,
                    })
                    .await;
                info!(
                    project_id = %candidate.project_id,
                    candidate_id = %candidate.candidate_id,
                    developer_id = %candidate.developer_id,
                    "candidate accepted"
                );
                Ok(candidate)
            }
            Err(RotaError::DeadlineExpired(id)) => {
                // The store expired the row as part of the failed accept;
                // surface that as the usual expiry event.
                if let Ok(candidate) = self.store.candidate(id).await {
                    self.events
                        .emit(DomainEvent::CandidateExpired {
                            project_id: candidate.project_id,
                            candidate_id: candidate.candidate_id,
                            developer_id: candidate.developer_id,
                        })
                        .await;
                }
                warn!(candidate_id = %id, "accept after deadline");
                Err(RotaError::DeadlineExpired(id))
            }
            Err(err) => Err(err),
        }
    }

    /// The developer declines the invitation.
    pub async fn reject_candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<AssignmentCandidate, RotaError> {
        let now = self.clock.now();
        let candidate = self.store.mark_rejected(candidate_id, now).await?;
        self.events
            .emit(DomainEvent::CandidateRejected {
                project_id: candidate.project_id,
                candidate_id: candidate.candidate_id,
                developer_id: candidate.developer_id,
            })
            .await;
        info!(
            project_id = %candidate.project_id,
            candidate_id = %candidate.candidate_id,
            "candidate rejected"
        );
        Ok(candidate)
    }

    /// Select, build, and atomically install a batch for `project`.
    async fn build_and_install(
        &self,
        project: &ProjectRecord,
    ) -> Result<(AssignmentBatch, crate::store::InstallOutcome), RotaError> {
        if project.required_skills.is_empty() {
            return Err(RotaError::NoRequiredSkills(project.project_id));
        }

        let developers = self.store.developers().await?;
        let history = self.store.candidates_for_project(project.project_id).await?;
        let picks = selection::select_candidates(project, &developers, &history, &self.policy);
        if picks.is_empty() {
            return Err(RotaError::NoEligibleDevelopers(project.project_id));
        }

        let now = self.clock.now();
        let deadline = now + self.policy.acceptance_window;
        let batch_id = self.ids.generate_batch_id();

        let candidates: Vec<AssignmentCandidate> = picks
            .iter()
            .map(|pick| {
                AssignmentCandidate::new(
                    self.ids.generate_candidate_id(),
                    batch_id,
                    project.project_id,
                    pick.developer_id,
                    pick.level,
                    deadline,
                    now,
                )
            })
            .collect();

        let batch = AssignmentBatch::new(
            batch_id,
            project.project_id,
            candidates.iter().map(|c| c.candidate_id).collect(),
            deadline,
            now,
        );

        let installed = self
            .store
            .install_batch(batch.clone(), candidates, now)
            .await?;
        Ok((batch, installed))
    }
}
