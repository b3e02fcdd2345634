//! Domain events emitted by the rotation/expiry lifecycle.
//!
//! The original system dispatched notifications (email/in-app) at these
//! points; the engine only emits, the `EventSink` port decides what to do.

use serde::{Deserialize, Serialize};

use super::ids::{BatchId, CandidateId, DeveloperId, ProjectId};

/// Events observers can subscribe to via [`crate::ports::EventSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A fresh batch was installed for a project.
    BatchGenerated {
        project_id: ProjectId,
        batch_id: BatchId,
        candidates: usize,
    },

    /// The previous batch was superseded and a new one installed.
    BatchRefreshed {
        project_id: ProjectId,
        old_batch_id: BatchId,
        new_batch_id: BatchId,
        expired_pending: usize,
    },

    /// First-accept-wins: this developer got the project.
    CandidateAccepted {
        project_id: ProjectId,
        candidate_id: CandidateId,
        developer_id: DeveloperId,
    },

    /// The developer declined.
    CandidateRejected {
        project_id: ProjectId,
        candidate_id: CandidateId,
        developer_id: DeveloperId,
    },

    /// The acceptance deadline passed without an answer.
    CandidateExpired {
        project_id: ProjectId,
        candidate_id: CandidateId,
        developer_id: DeveloperId,
    },
}
