//! State machines for candidates and projects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate response state.
///
/// State transitions (one-way, no re-entry to Pending):
/// - Pending -> Accepted (terminal; at most one per project)
/// - Pending -> Rejected (terminal)
/// - Pending -> Expired  (terminal)
///
/// Design note: Using an enum ensures exhaustive matching and prevents
/// invalid states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Waiting for the developer's answer, deadline running.
    Pending,

    /// The developer took the project (first-accept-wins).
    Accepted,

    /// The developer declined.
    Rejected,

    /// The acceptance deadline passed without an answer.
    Expired,
}

impl ResponseStatus {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        !matches!(self, ResponseStatus::Pending)
    }

    /// Can this candidate still answer (eligible for accept/reject)?
    pub fn is_pending(self) -> bool {
        matches!(self, ResponseStatus::Pending)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseStatus::Pending => "pending",
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Rejected => "rejected",
            ResponseStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// Project rotation state.
///
/// State transitions:
/// - Open -> Accepted (first acceptance; terminal for rotation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Rotation may generate batches and candidates may accept.
    Open,

    /// A developer accepted; no further batches or acceptances.
    Accepted,
}

impl ProjectStatus {
    pub fn is_open(self) -> bool {
        matches!(self, ProjectStatus::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::accepted(ResponseStatus::Accepted)]
    #[case::rejected(ResponseStatus::Rejected)]
    #[case::expired(ResponseStatus::Expired)]
    fn resolved_states_are_terminal(#[case] status: ResponseStatus) {
        assert!(status.is_terminal());
        assert!(!status.is_pending());
    }

    #[test]
    fn pending_is_not_terminal() {
        assert!(!ResponseStatus::Pending.is_terminal());
        assert!(ResponseStatus::Pending.is_pending());
    }

    #[test]
    fn project_status_open_check() {
        assert!(ProjectStatus::Open.is_open());
        assert!(!ProjectStatus::Accepted.is_open());
    }
}
