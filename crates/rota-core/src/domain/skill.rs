use serde::{Deserialize, Serialize};
use std::fmt;

/// A skill tag ("rust", "react", ...). Compared case-insensitively by
/// normalizing to lowercase at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Skill(String);

impl Skill {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Experience tier used to group candidates within a batch.
///
/// Rotation selects up to N developers per tier so a batch always mixes
/// price points instead of being dominated by one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Fresher,
    Mid,
    Expert,
}

impl ExperienceLevel {
    /// All tiers, in batch ordering (cheapest first).
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Fresher,
        ExperienceLevel::Mid,
        ExperienceLevel::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "fresher",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
