//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{AssignmentStore, InstallOutcome};
use crate::domain::{
    AssignmentBatch, AssignmentCandidate, BatchId, CandidateId, DeveloperId, DeveloperProfile,
    ProjectId, ProjectRecord,
};
use crate::error::RotaError;
use crate::observability::{BatchStatus, CandidateCounts, CandidateView};

/// In-memory store state.
struct InMemoryState {
    /// All developer profiles.
    developers: HashMap<DeveloperId, DeveloperProfile>,

    /// All project records (single source of truth for currency/assignment).
    projects: HashMap<ProjectId, ProjectRecord>,

    /// All batches ever generated, current or superseded.
    batches: HashMap<BatchId, AssignmentBatch>,

    /// All candidate records (single source of truth for lifecycle).
    candidates: HashMap<CandidateId, AssignmentCandidate>,

    /// Index: candidate history per project, in insertion order.
    by_project: HashMap<ProjectId, Vec<CandidateId>>,
}

impl InMemoryState {
    fn new() -> Self {
        Self {
            developers: HashMap::new(),
            projects: HashMap::new(),
            batches: HashMap::new(),
            candidates: HashMap::new(),
            by_project: HashMap::new(),
        }
    }

    fn project_candidates(&self, project_id: ProjectId) -> Vec<AssignmentCandidate> {
        self.by_project
            .get(&project_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.candidates.get(id))
            .cloned()
            .collect()
    }

    /// Expire the still-pending members of `batch_id`. Returns the rows.
    fn expire_pending_of_batch(
        &mut self,
        batch_id: BatchId,
        now: DateTime<Utc>,
    ) -> Vec<AssignmentCandidate> {
        let Some(batch) = self.batches.get(&batch_id) else {
            return Vec::new();
        };
        let members = batch.candidate_ids.clone();
        let mut expired = Vec::new();
        for id in members {
            if let Some(candidate) = self.candidates.get_mut(&id)
                && candidate.status.is_pending()
            {
                candidate.mark_expired(now);
                expired.push(candidate.clone());
            }
        }
        expired
    }
}

/// In-memory store implementation.
///
/// One `tokio::sync::Mutex` guards the whole state, so every trait method is
/// a single critical section. This is exactly the guarantee `try_accept`
/// needs (the original system checked then wrote in two steps and could mark
/// two candidates as first under concurrent acceptance).
pub struct InMemoryStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn register_developer(&self, profile: DeveloperProfile) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        state.developers.insert(profile.developer_id, profile);
        Ok(())
    }

    async fn create_project(&self, record: ProjectRecord) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        state.by_project.entry(record.project_id).or_default();
        state.projects.insert(record.project_id, record);
        Ok(())
    }

    async fn project(&self, project_id: ProjectId) -> Result<ProjectRecord, RotaError> {
        let state = self.state.lock().await;
        state
            .projects
            .get(&project_id)
            .cloned()
            .ok_or(RotaError::ProjectNotFound(project_id))
    }

    async fn developers(&self) -> Result<Vec<DeveloperProfile>, RotaError> {
        let state = self.state.lock().await;
        Ok(state.developers.values().cloned().collect())
    }

    async fn candidates_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<AssignmentCandidate>, RotaError> {
        let state = self.state.lock().await;
        if !state.projects.contains_key(&project_id) {
            return Err(RotaError::ProjectNotFound(project_id));
        }
        Ok(state.project_candidates(project_id))
    }

    async fn candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<AssignmentCandidate, RotaError> {
        let state = self.state.lock().await;
        state
            .candidates
            .get(&candidate_id)
            .cloned()
            .ok_or(RotaError::CandidateNotFound(candidate_id))
    }

    async fn batch(&self, batch_id: BatchId) -> Result<AssignmentBatch, RotaError> {
        let state = self.state.lock().await;
        state
            .batches
            .get(&batch_id)
            .cloned()
            .ok_or(RotaError::BatchNotFound(batch_id))
    }

    async fn current_batch(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<AssignmentBatch>, RotaError> {
        let state = self.state.lock().await;
        let project = state
            .projects
            .get(&project_id)
            .ok_or(RotaError::ProjectNotFound(project_id))?;
        Ok(project
            .current_batch_id
            .and_then(|id| state.batches.get(&id))
            .cloned())
    }

    async fn install_batch(
        &self,
        batch: AssignmentBatch,
        candidates: Vec<AssignmentCandidate>,
        now: DateTime<Utc>,
    ) -> Result<InstallOutcome, RotaError> {
        let mut state = self.state.lock().await;

        let project_id = batch.project_id;
        let previous_batch = {
            let project = state
                .projects
                .get(&project_id)
                .ok_or(RotaError::ProjectNotFound(project_id))?;
            if !project.status.is_open() {
                return Err(RotaError::ProjectAlreadyAccepted(project_id));
            }
            project.current_batch_id
        };

        // Supersede: leftover pendings of the old batch die here, so a
        // developer never holds two live invitations for one project.
        let expired = match previous_batch {
            Some(old) => state.expire_pending_of_batch(old, now),
            None => Vec::new(),
        };

        let batch_id = batch.batch_id;
        for candidate in candidates {
            state
                .by_project
                .entry(project_id)
                .or_default()
                .push(candidate.candidate_id);
            state.candidates.insert(candidate.candidate_id, candidate);
        }
        state.batches.insert(batch_id, batch);
        state
            .projects
            .get_mut(&project_id)
            .expect("project checked above")
            .set_current_batch(batch_id, now);

        Ok(InstallOutcome {
            previous_batch,
            expired,
        })
    }

    async fn try_accept(
        &self,
        candidate_id: CandidateId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentCandidate, RotaError> {
        let mut state = self.state.lock().await;

        // Everything below happens under one lock: check + write is atomic,
        // so two racing accepts serialize and the loser sees a closed project.
        let candidate = state
            .candidates
            .get(&candidate_id)
            .ok_or(RotaError::CandidateNotFound(candidate_id))?;

        if candidate.status.is_terminal() {
            return Err(RotaError::CandidateAlreadyResolved {
                id: candidate_id,
                status: candidate.status,
            });
        }

        if candidate.is_past_deadline(now) {
            // Eager expiry: don't leave the row pending for the sweep.
            state
                .candidates
                .get_mut(&candidate_id)
                .expect("candidate fetched above")
                .mark_expired(now);
            return Err(RotaError::DeadlineExpired(candidate_id));
        }

        let project_id = candidate.project_id;
        let developer_id = candidate.developer_id;

        let project = state
            .projects
            .get_mut(&project_id)
            .ok_or(RotaError::ProjectNotFound(project_id))?;
        if !project.status.is_open() {
            return Err(RotaError::ProjectAlreadyAccepted(project_id));
        }
        project.mark_accepted(developer_id, now);

        let candidate = state
            .candidates
            .get_mut(&candidate_id)
            .expect("candidate fetched above");
        candidate.mark_accepted(true, now);
        Ok(candidate.clone())
    }

    async fn mark_rejected(
        &self,
        candidate_id: CandidateId,
        now: DateTime<Utc>,
    ) -> Result<AssignmentCandidate, RotaError> {
        let mut state = self.state.lock().await;
        let candidate = state
            .candidates
            .get_mut(&candidate_id)
            .ok_or(RotaError::CandidateNotFound(candidate_id))?;

        if candidate.status.is_terminal() {
            return Err(RotaError::CandidateAlreadyResolved {
                id: candidate_id,
                status: candidate.status,
            });
        }

        candidate.mark_rejected(now);
        Ok(candidate.clone())
    }

    async fn expire_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssignmentCandidate>, RotaError> {
        let mut state = self.state.lock().await;
        let mut expired = Vec::new();
        for candidate in state.candidates.values_mut() {
            if candidate.status.is_pending() && candidate.is_past_deadline(now) {
                candidate.mark_expired(now);
                expired.push(candidate.clone());
            }
        }
        // Stable output order for callers and tests.
        expired.sort_by_key(|c| c.candidate_id);
        Ok(expired)
    }

    async fn counts_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<CandidateCounts, RotaError> {
        let state = self.state.lock().await;
        if !state.projects.contains_key(&project_id) {
            return Err(RotaError::ProjectNotFound(project_id));
        }
        let candidates = state.project_candidates(project_id);
        Ok(CandidateCounts::tally(&candidates))
    }

    async fn batch_status(&self, batch_id: BatchId) -> Result<BatchStatus, RotaError> {
        let state = self.state.lock().await;
        let batch = state
            .batches
            .get(&batch_id)
            .ok_or(RotaError::BatchNotFound(batch_id))?;
        let candidates = batch
            .candidate_ids
            .iter()
            .filter_map(|id| state.candidates.get(id))
            .map(CandidateView::from)
            .collect();
        Ok(BatchStatus {
            batch_id: batch.batch_id,
            project_id: batch.project_id,
            acceptance_deadline: batch.acceptance_deadline,
            created_at: batch.created_at,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExperienceLevel, ResponseStatus, Skill};
    use chrono::Duration;
    use ulid::Ulid;

    fn new_project(now: DateTime<Utc>) -> ProjectRecord {
        ProjectRecord::new(
            ProjectId::from_ulid(Ulid::new()),
            "test project",
            vec![Skill::new("rust")],
            now,
        )
    }

    fn new_batch(
        project_id: ProjectId,
        n: usize,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> (AssignmentBatch, Vec<AssignmentCandidate>) {
        let batch_id = BatchId::from_ulid(Ulid::new());
        let candidates: Vec<_> = (0..n)
            .map(|_| {
                AssignmentCandidate::new(
                    CandidateId::from_ulid(Ulid::new()),
                    batch_id,
                    project_id,
                    DeveloperId::from_ulid(Ulid::new()),
                    ExperienceLevel::Mid,
                    deadline,
                    now,
                )
            })
            .collect();
        let batch = AssignmentBatch::new(
            batch_id,
            project_id,
            candidates.iter().map(|c| c.candidate_id).collect(),
            deadline,
            now,
        );
        (batch, candidates)
    }

    #[tokio::test]
    async fn install_batch_sets_current() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 2, now + Duration::minutes(15), now);
        let batch_id = batch.batch_id;
        let outcome = store.install_batch(batch, candidates, now).await.unwrap();

        assert_eq!(outcome.previous_batch, None);
        assert!(outcome.expired.is_empty());
        let current = store.current_batch(project_id).await.unwrap().unwrap();
        assert_eq!(current.batch_id, batch_id);
        let counts = store.counts_for_project(project_id).await.unwrap();
        assert_eq!(counts.pending, 2);
    }

    #[tokio::test]
    async fn reinstall_expires_previous_pendings() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (first, first_candidates) = new_batch(project_id, 3, now + Duration::minutes(15), now);
        let first_id = first.batch_id;
        store.install_batch(first, first_candidates, now).await.unwrap();

        // One member rejects before the refresh; only the two leftovers expire.
        let first_batch = store.batch(first_id).await.unwrap();
        store
            .mark_rejected(first_batch.candidate_ids[0], now)
            .await
            .unwrap();

        let (second, second_candidates) =
            new_batch(project_id, 2, now + Duration::minutes(30), now);
        let outcome = store
            .install_batch(second, second_candidates, now)
            .await
            .unwrap();

        assert_eq!(outcome.previous_batch, Some(first_id));
        assert_eq!(outcome.expired.len(), 2);
        assert!(
            outcome
                .expired
                .iter()
                .all(|c| c.status == ResponseStatus::Expired)
        );
        let counts = store.counts_for_project(project_id).await.unwrap();
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.expired, 2);
    }

    #[tokio::test]
    async fn accept_transitions_candidate_and_project() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 2, now + Duration::minutes(15), now);
        let winner = candidates[0].candidate_id;
        store.install_batch(batch, candidates, now).await.unwrap();

        let accepted = store.try_accept(winner, now).await.unwrap();
        assert_eq!(accepted.status, ResponseStatus::Accepted);
        assert!(accepted.is_first_accepted);

        let project = store.project(project_id).await.unwrap();
        assert!(!project.status.is_open());
        assert_eq!(project.assigned_developer, Some(accepted.developer_id));
    }

    #[tokio::test]
    async fn second_accept_on_same_project_fails_closed() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 2, now + Duration::minutes(15), now);
        let first = candidates[0].candidate_id;
        let second = candidates[1].candidate_id;
        store.install_batch(batch, candidates, now).await.unwrap();

        store.try_accept(first, now).await.unwrap();
        let err = store.try_accept(second, now).await.unwrap_err();
        assert!(matches!(err, RotaError::ProjectAlreadyAccepted(p) if p == project_id));

        // The loser stays pending (the sweep will expire it later); it was
        // not silently accepted.
        let loser = store.candidate(second).await.unwrap();
        assert_eq!(loser.status, ResponseStatus::Pending);
        assert!(!loser.is_first_accepted);
    }

    #[tokio::test]
    async fn concurrent_accepts_yield_exactly_one_winner() {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 2, now + Duration::minutes(15), now);
        let a = candidates[0].candidate_id;
        let b = candidates[1].candidate_id;
        store.install_batch(batch, candidates, now).await.unwrap();

        let s1 = Arc::clone(&store);
        let s2 = Arc::clone(&store);
        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.try_accept(a, now).await }),
            tokio::spawn(async move { s2.try_accept(b, now).await }),
        );
        let results = [r1.unwrap(), r2.unwrap()];

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let first_flags = [store.candidate(a).await.unwrap(), store.candidate(b).await.unwrap()]
            .iter()
            .filter(|c| c.is_first_accepted)
            .count();
        assert_eq!(first_flags, 1);
    }

    #[tokio::test]
    async fn accept_past_deadline_expires_the_candidate() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 1, now + Duration::minutes(15), now);
        let id = candidates[0].candidate_id;
        store.install_batch(batch, candidates, now).await.unwrap();

        let late = now + Duration::minutes(16);
        let err = store.try_accept(id, late).await.unwrap_err();
        assert!(matches!(err, RotaError::DeadlineExpired(c) if c == id));

        let candidate = store.candidate(id).await.unwrap();
        assert_eq!(candidate.status, ResponseStatus::Expired);

        // Project is untouched: nobody won.
        let project = store.project(project_id).await.unwrap();
        assert!(project.status.is_open());
    }

    #[tokio::test]
    async fn resolved_candidates_cannot_transition_again() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 1, now + Duration::minutes(15), now);
        let id = candidates[0].candidate_id;
        store.install_batch(batch, candidates, now).await.unwrap();

        store.mark_rejected(id, now).await.unwrap();

        let err = store.try_accept(id, now).await.unwrap_err();
        assert!(matches!(
            err,
            RotaError::CandidateAlreadyResolved {
                status: ResponseStatus::Rejected,
                ..
            }
        ));
        let err = store.mark_rejected(id, now).await.unwrap_err();
        assert!(matches!(err, RotaError::CandidateAlreadyResolved { .. }));
    }

    #[tokio::test]
    async fn expire_due_is_idempotent() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let project = new_project(now);
        let project_id = project.project_id;
        store.create_project(project).await.unwrap();

        let (batch, candidates) = new_batch(project_id, 3, now + Duration::minutes(15), now);
        store.install_batch(batch, candidates, now).await.unwrap();

        // Before the deadline nothing happens.
        assert!(store.expire_due(now).await.unwrap().is_empty());

        let late = now + Duration::minutes(20);
        let expired = store.expire_due(late).await.unwrap();
        assert_eq!(expired.len(), 3);
        assert!(expired.iter().all(|c| c.status == ResponseStatus::Expired));

        // Second sweep finds nothing left to do.
        assert!(store.expire_due(late).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_fail_closed() {
        let store = InMemoryStore::new();
        let now = Utc::now();

        let missing_candidate = CandidateId::from_ulid(Ulid::new());
        assert!(matches!(
            store.try_accept(missing_candidate, now).await.unwrap_err(),
            RotaError::CandidateNotFound(_)
        ));

        let missing_project = ProjectId::from_ulid(Ulid::new());
        assert!(matches!(
            store.project(missing_project).await.unwrap_err(),
            RotaError::ProjectNotFound(_)
        ));

        let missing_batch = BatchId::from_ulid(Ulid::new());
        assert!(matches!(
            store.batch_status(missing_batch).await.unwrap_err(),
            RotaError::BatchNotFound(_)
        ));
    }
}
