//! Candidate selection: who goes into the next batch.
//!
//! This is a pure function over snapshots, so it is trivially testable.
//! The store decides nothing here; the service decides nothing elsewhere.

use std::collections::HashSet;

use crate::domain::{
    AssignmentCandidate, DeveloperId, DeveloperProfile, ExperienceLevel, ProjectRecord,
};

use super::RotationPolicy;

/// A developer chosen for the next batch, with the tier they were chosen
/// under frozen at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedDeveloper {
    pub developer_id: DeveloperId,
    pub level: ExperienceLevel,
}

/// Select up to `policy.per_tier` developers per experience tier for the
/// project's next batch.
///
/// Rules:
/// - Only available developers with at least one required skill qualify.
/// - A developer with *any* prior candidate row for this project (pending,
///   accepted, rejected, or expired) is never proposed again.
/// - Within a tier, more matched skills rank higher; ties break on
///   developer id (ULIDs, so effectively registration order) to keep the
///   rotation deterministic.
///
/// Output is ordered tier by tier (fresher, mid, expert).
pub fn select_candidates(
    project: &ProjectRecord,
    developers: &[DeveloperProfile],
    history: &[AssignmentCandidate],
    policy: &RotationPolicy,
) -> Vec<SelectedDeveloper> {
    let seen: HashSet<DeveloperId> = history.iter().map(|c| c.developer_id).collect();

    let mut selected = Vec::new();
    for level in ExperienceLevel::ALL {
        let mut tier: Vec<&DeveloperProfile> = developers
            .iter()
            .filter(|d| d.level == level)
            .filter(|d| d.available)
            .filter(|d| !seen.contains(&d.developer_id))
            .filter(|d| d.matched_skills(&project.required_skills) > 0)
            .collect();

        tier.sort_by(|a, b| {
            b.matched_skills(&project.required_skills)
                .cmp(&a.matched_skills(&project.required_skills))
                .then(a.developer_id.cmp(&b.developer_id))
        });

        selected.extend(tier.into_iter().take(policy.per_tier).map(|d| {
            SelectedDeveloper {
                developer_id: d.developer_id,
                level,
            }
        }));
    }
    selected
}
