use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BatchId, DeveloperId, ProjectId};
use super::skill::Skill;
use super::state::ProjectStatus;

/// Project record: the unit clients post and developers accept.
///
/// Design:
/// - This is the "single source of truth" for which batch is current
///   (`current_batch_id`) and who won the project (`assigned_developer`).
/// - State transitions happen via methods, not direct field access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_id: ProjectId,
    pub title: String,
    pub required_skills: Vec<Skill>,
    pub status: ProjectStatus,

    /// Exactly one batch is current per project; `None` before the first
    /// `generate_batch`.
    pub current_batch_id: Option<BatchId>,

    /// Set once, by the first (and only) successful acceptance.
    pub assigned_developer: Option<DeveloperId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        required_skills: Vec<Skill>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            required_skills,
            status: ProjectStatus::Open,
            current_batch_id: None,
            assigned_developer: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Install a batch as the current one.
    pub fn set_current_batch(&mut self, batch_id: BatchId, now: DateTime<Utc>) {
        self.current_batch_id = Some(batch_id);
        self.updated_at = now;
    }

    /// First acceptance: record the winner and close rotation.
    pub fn mark_accepted(&mut self, developer_id: DeveloperId, now: DateTime<Utc>) {
        self.status = ProjectStatus::Accepted;
        self.assigned_developer = Some(developer_id);
        self.updated_at = now;
    }
}
