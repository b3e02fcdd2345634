//! Rotation policy: batch sizing and deadlines.

use chrono::Duration;

/// Tunables for batch generation.
///
/// v1: Simple policy with fixed per-tier quota and acceptance window.
/// Future: Could add per-project overrides, business-hours deadlines, etc.
#[derive(Debug, Clone)]
pub struct RotationPolicy {
    /// Maximum candidates selected per experience tier.
    pub per_tier: usize,

    /// How long a candidate has to answer before expiring.
    pub acceptance_window: Duration,

    /// How often the in-process sweeper checks for due candidates.
    pub sweep_interval: std::time::Duration,
}

impl RotationPolicy {
    /// Default policy for v1 (matches requirements: 15-minute acceptance
    /// deadline, up to 2 developers per tier).
    pub fn default_v1() -> Self {
        Self {
            per_tier: 2,
            acceptance_window: Duration::minutes(15),
            sweep_interval: std::time::Duration::from_secs(60),
        }
    }
}
