use serde::{Deserialize, Serialize};

use super::ids::DeveloperId;
use super::skill::{ExperienceLevel, Skill};

/// A developer who can be rotated into project batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub developer_id: DeveloperId,
    pub name: String,
    pub level: ExperienceLevel,
    pub skills: Vec<Skill>,

    /// Unavailable developers (vacation, unapproved, at capacity) are
    /// skipped by selection.
    pub available: bool,
}

impl DeveloperProfile {
    pub fn new(
        developer_id: DeveloperId,
        name: impl Into<String>,
        level: ExperienceLevel,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            developer_id,
            name: name.into(),
            level,
            skills,
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Number of the project's required skills this developer covers.
    pub fn matched_skills(&self, required: &[Skill]) -> usize {
        required.iter().filter(|s| self.skills.contains(s)).count()
    }
}
